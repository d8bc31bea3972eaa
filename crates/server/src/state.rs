use std::sync::Arc;
use textconvert_common::{AppConfig, Result};
use textconvert_llm::{ChunkProcessor, Chunker, LlmClient, OllamaClient};
use textconvert_render::{DocumentRenderer, Renderer};

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Paragraph-aware splitter sized from `config.chunk_size`
    pub chunker: Chunker,

    /// Completion-service driver
    pub processor: ChunkProcessor,

    /// Output document renderer
    pub renderer: Arc<dyn DocumentRenderer>,
}

impl AppState {
    /// Create application state talking to the configured Ollama host
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Arc::new(OllamaClient::from_config(&config)?);
        Self::with_components(config, client, Arc::new(Renderer))
    }

    /// Create application state from explicit collaborators
    pub fn with_components(
        config: AppConfig,
        client: Arc<dyn LlmClient>,
        renderer: Arc<dyn DocumentRenderer>,
    ) -> Result<Self> {
        let chunker = Chunker::new(config.chunk_size)?;
        let processor = ChunkProcessor::from_config(client, &config);

        Ok(Self {
            config,
            chunker,
            processor,
            renderer,
        })
    }
}
