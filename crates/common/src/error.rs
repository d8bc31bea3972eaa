/// Text converter error types
#[derive(Debug, thiserror::Error)]
pub enum ConverterError {
    /// Uploaded file exceeds the configured maximum
    #[error("File too large. Maximum size is {max} bytes")]
    FileTooLarge { size: usize, max: usize },

    /// Uploaded bytes are not valid UTF-8
    #[error("File must be valid UTF-8 text")]
    InvalidEncoding,

    /// Unknown or non-uploadable output format
    #[error("Invalid output format: {0}")]
    UnsupportedFormat(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Completion service returned something unusable
    #[error("LLM error: {0}")]
    Llm(String),

    /// Network/HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Document rendering failed
    #[error("{0}")]
    Render(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConverterError {
    /// Create file-too-large error
    pub fn file_too_large(size: usize, max: usize) -> Self {
        Self::FileTooLarge { size, max }
    }

    /// Create unsupported format error
    pub fn unsupported_format<S: Into<String>>(name: S) -> Self {
        Self::UnsupportedFormat(name.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create LLM error
    pub fn llm<S: Into<String>>(msg: S) -> Self {
        Self::Llm(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create render error
    pub fn render<S: Into<String>>(msg: S) -> Self {
        Self::Render(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}

// HTTP response conversion (used by the actix-web layer)
impl ConverterError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::FileTooLarge { .. } => 413,
            Self::InvalidEncoding => 400,
            Self::UnsupportedFormat(_) => 400,
            Self::InvalidInput(_) => 400,
            Self::Json(_) => 400,
            Self::Network(_) => 503,
            Self::Llm(_) => 500,
            Self::Render(_) => 500,
            Self::Config(_) => 500,
            Self::Io(_) => 500,
            Self::Other(_) => 500,
        }
    }
}
