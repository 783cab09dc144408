use std::collections::BTreeSet;

use crate::domain::SafetyScore;

pub const DEFAULT_THRESHOLD: f64 = 0.75;

pub const DEFAULT_BLOCKED_TERMS: &[&str] = &[
    "hate", "kill", "violence", "racist", "terrorist", "scam", "nazi", "suicide", "porn", "nsfw",
];

const SAFETY_WEIGHT: f64 = 0.5;
const QUALITY_WEIGHT: f64 = 0.3;
const CONTEXT_WEIGHT: f64 = 0.2;

const BLOCKED_TERM_PENALTY: f64 = 0.6;
const MIN_POST_CHARS: usize = 20;
const MAX_POST_CHARS: usize = 3000;
const SHORT_PENALTY: f64 = 0.5;
const LONG_PENALTY: f64 = 0.4;
const SHOUTING_RATIO: f64 = 0.5;
const SHOUTING_MIN_LETTERS: usize = 10;
const SHOUTING_PENALTY: f64 = 0.3;
const MISSING_HASHTAG_PENALTY: f64 = 0.1;
const NO_CONTEXT_SCORE: f64 = 0.5;

/// Scores generated posts and decides whether they may be published.
#[derive(Debug, Clone)]
pub struct SafetyGatekeeper {
    threshold: f64,
    blocked_terms: BTreeSet<String>,
}

impl SafetyGatekeeper {
    pub fn new(threshold: f64, blocked_terms: impl IntoIterator<Item = String>) -> Self {
        Self {
            threshold,
            blocked_terms: blocked_terms
                .into_iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// `avg_distance` is the mean context distance, negative when no context was found.
    pub fn evaluate(&self, post: &str, avg_distance: f32) -> SafetyScore {
        let flagged_terms = self.flagged_terms(post);
        let safety_score =
            (1.0 - BLOCKED_TERM_PENALTY * flagged_terms.len() as f64).max(0.0);
        let quality_score = quality_score(post);
        let context_score = context_score(avg_distance);

        let final_score = round4(
            SAFETY_WEIGHT * safety_score
                + QUALITY_WEIGHT * quality_score
                + CONTEXT_WEIGHT * context_score,
        );

        SafetyScore {
            safety_score: round4(safety_score),
            quality_score: round4(quality_score),
            context_score: round4(context_score),
            final_score,
            threshold: self.threshold,
            flagged_terms,
            passed: final_score >= self.threshold,
        }
    }

    fn flagged_terms(&self, post: &str) -> Vec<String> {
        let words: BTreeSet<String> = post
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();

        self.blocked_terms
            .iter()
            .filter(|term| words.contains(*term))
            .cloned()
            .collect()
    }
}

impl Default for SafetyGatekeeper {
    fn default() -> Self {
        Self::new(
            DEFAULT_THRESHOLD,
            DEFAULT_BLOCKED_TERMS.iter().map(|t| t.to_string()),
        )
    }
}

fn quality_score(post: &str) -> f64 {
    let trimmed = post.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let mut score: f64 = 1.0;
    let chars = trimmed.chars().count();

    if chars < MIN_POST_CHARS {
        score -= SHORT_PENALTY;
    }
    if chars > MAX_POST_CHARS {
        score -= LONG_PENALTY;
    }

    let letters = trimmed.chars().filter(|c| c.is_alphabetic()).count();
    let upper = trimmed.chars().filter(|c| c.is_uppercase()).count();
    if letters >= SHOUTING_MIN_LETTERS && upper as f64 / letters as f64 > SHOUTING_RATIO {
        score -= SHOUTING_PENALTY;
    }

    if !trimmed.split_whitespace().any(is_hashtag) {
        score -= MISSING_HASHTAG_PENALTY;
    }

    score.max(0.0)
}

fn is_hashtag(word: &str) -> bool {
    word.strip_prefix('#')
        .is_some_and(|tag| tag.chars().next().is_some_and(char::is_alphanumeric))
}

fn context_score(avg_distance: f32) -> f64 {
    if avg_distance < 0.0 {
        return NO_CONTEXT_SCORE;
    }
    1.0 / (1.0 + avg_distance as f64)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
