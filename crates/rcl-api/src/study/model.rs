use rcl_review::ReviewOptions;
use serde::{Deserialize, Serialize};

/// Query of `GET /study/next`.
#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub mode: String,
    pub input_mode: Option<String>,
    pub exclude_input_mode: Option<String>,
}

/// Upper bound on `extra_progress` accepted in one request.
pub const MAX_EXTRA_PROGRESS: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub quality: u8,
    #[serde(flatten)]
    pub options: ReviewOptions,
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub input_mode: String,
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub correct: bool,
}
