use serde::{Deserialize, Serialize};
use textconvert_llm::HealthReport;

/// GET / response
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

/// GET /health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the server answers
    pub status: &'static str,

    /// GPU flag from configuration
    pub use_gpu: bool,

    /// Completion service probe
    pub ollama: HealthReport,
}

/// POST /preview response
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    /// Processed (or untouched) preview text
    pub preview: String,

    /// Length of the uploaded text in characters
    pub original_length: usize,

    /// Length of the text that was processed
    pub preview_length: usize,

    /// Whether the upload was cut to `max_preview_length`
    pub is_truncated: bool,
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
