#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    Success,
    Error,
}

impl PublishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Success => "success",
            PublishStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub status: PublishStatus,
    pub message: String,
    pub platform: Option<String>,
}

impl PublishOutcome {
    pub fn success(platform: &str, message: String) -> Self {
        Self {
            status: PublishStatus::Success,
            message,
            platform: Some(platform.to_string()),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            status: PublishStatus::Error,
            message,
            platform: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PublishStatus::Success
    }
}
