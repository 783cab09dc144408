/// Breakdown produced by the gatekeeper for one generated post.
#[derive(Debug, Clone, PartialEq)]
pub struct SafetyScore {
    pub safety_score: f64,
    pub quality_score: f64,
    pub context_score: f64,
    pub final_score: f64,
    pub threshold: f64,
    pub flagged_terms: Vec<String>,
    pub passed: bool,
}
