pub mod config;
pub mod error;
pub mod format;
pub mod logger;

// Re-export commonly used types
pub use config::{parse_bool, AppConfig};
pub use error::ConverterError;
pub use format::OutputFormat;
pub type Result<T> = std::result::Result<T, ConverterError>;
