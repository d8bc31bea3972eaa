use crate::error::ConverterError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Text converter application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server bind address
    pub api_host: String,

    /// Server port
    pub api_port: u16,

    /// Maximum accepted upload size in bytes
    pub max_file_size: usize,

    /// Maximum chunk length in characters
    pub chunk_size: usize,

    /// Pause between consecutive chunk submissions
    pub chunk_delay_ms: u64,

    /// Timeout for generate calls
    pub request_timeout_secs: u64,

    /// Timeout for the model listing health probe
    pub health_timeout_secs: u64,

    /// Bundled Ollama API base URL
    pub ollama_host: String,

    /// Model used for text enhancement
    pub ollama_model: String,

    /// GPU flag (reported by /health)
    pub use_gpu: bool,

    /// Use `external_ollama_host` instead of `ollama_host`
    pub use_external_ollama: bool,

    /// Ollama running outside the deployment
    pub external_ollama_host: String,

    /// Static frontend directory, mounted at /static when present
    pub frontend_dir: PathBuf,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8000,
            max_file_size: 100 * 1024 * 1024,
            chunk_size: 1024 * 1024,
            chunk_delay_ms: 500,
            request_timeout_secs: 120,
            health_timeout_secs: 5,
            ollama_host: "http://ollama:11434".to_string(),
            ollama_model: "llama3.1:8b".to_string(),
            use_gpu: false,
            use_external_ollama: false,
            external_ollama_host: "http://localhost:11434".to_string(),
            frontend_dir: PathBuf::from("./frontend"),
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, ConverterError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConverterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key).and_then(|v| parse_bool(&v)).unwrap_or(default)
        };

        let config = Self {
            api_host: lookup("API_HOST").unwrap_or(defaults.api_host),
            api_port: parse_or(lookup("API_PORT"), defaults.api_port),
            max_file_size: parse_or(lookup("MAX_FILE_SIZE"), defaults.max_file_size),
            chunk_size: parse_or(lookup("CHUNK_SIZE"), defaults.chunk_size),
            chunk_delay_ms: parse_or(lookup("CHUNK_DELAY_MS"), defaults.chunk_delay_ms),
            request_timeout_secs: parse_or(lookup("REQUEST_TIMEOUT_SECS"), defaults.request_timeout_secs),
            health_timeout_secs: parse_or(lookup("HEALTH_TIMEOUT_SECS"), defaults.health_timeout_secs),
            ollama_host: lookup("OLLAMA_HOST").unwrap_or(defaults.ollama_host),
            ollama_model: lookup("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            use_gpu: flag("USE_GPU", defaults.use_gpu),
            use_external_ollama: flag("USE_EXTERNAL_OLLAMA", defaults.use_external_ollama),
            external_ollama_host: lookup("EXTERNAL_OLLAMA_HOST")
                .unwrap_or(defaults.external_ollama_host),
            frontend_dir: lookup("FRONTEND_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.frontend_dir),
            log_dir: lookup("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;

        Ok(config)
    }

    /// Ollama host actually used for completion calls
    pub fn completion_host(&self) -> &str {
        if self.use_external_ollama {
            &self.external_ollama_host
        } else {
            &self.ollama_host
        }
    }

    /// Pause between chunk submissions
    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }

    /// Timeout for a single generate call
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Timeout for the health probe
    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConverterError> {
        for (name, url) in [
            ("OLLAMA_HOST", &self.ollama_host),
            ("EXTERNAL_OLLAMA_HOST", &self.external_ollama_host),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConverterError::config(format!(
                    "{} must start with http:// or https://",
                    name
                )));
            }
        }

        if self.ollama_model.trim().is_empty() {
            return Err(ConverterError::config("Ollama model name cannot be empty"));
        }

        if self.api_port == 0 {
            return Err(ConverterError::config("Server port cannot be 0"));
        }

        if self.chunk_size == 0 {
            return Err(ConverterError::config("Chunk size must be positive"));
        }

        if self.max_file_size == 0 {
            return Err(ConverterError::config("Maximum file size must be positive"));
        }

        Ok(())
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Parse a boolean flag as written in env files and HTML forms
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_port, 8000);
        assert_eq!(config.max_file_size, 104_857_600);
        assert_eq!(config.chunk_size, 1_048_576);
        assert_eq!(config.chunk_delay(), Duration::from_millis(500));
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
        assert_eq!(config.health_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_server_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.server_bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("API_PORT", "9001"),
            ("CHUNK_SIZE", "2048"),
            ("CHUNK_DELAY_MS", "0"),
            ("OLLAMA_MODEL", "mistral"),
            ("USE_GPU", "yes"),
        ]))
        .unwrap();
        assert_eq!(config.api_port, 9001);
        assert_eq!(config.chunk_size, 2048);
        assert_eq!(config.chunk_delay_ms, 0);
        assert_eq!(config.ollama_model, "mistral");
        assert!(config.use_gpu);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("API_PORT", "not-a-port"),
            ("USE_EXTERNAL_OLLAMA", "maybe"),
        ]))
        .unwrap();
        assert_eq!(config.api_port, 8000);
        assert!(!config.use_external_ollama);
    }

    #[test]
    fn test_completion_host() {
        let mut config = AppConfig::default();
        assert_eq!(config.completion_host(), "http://ollama:11434");
        config.use_external_ollama = true;
        assert_eq!(config.completion_host(), "http://localhost:11434");
    }

    #[test]
    fn test_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid_config = AppConfig::default();
        invalid_config.ollama_host = "ollama:11434".to_string();
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = AppConfig::default();
        invalid_config.chunk_size = 0;
        assert!(invalid_config.validate().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("2"), None);
    }
}
