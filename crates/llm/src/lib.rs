//! Text converter LLM integration
//!
//! Ollama API client, paragraph-aware chunking and sequential chunk enhancement

mod chunking;
mod client;
mod health;
mod llm_trait;
mod processor;
mod prompts;
mod types;

pub use chunking::{Chunker, TextChunk};
pub use client::OllamaClient;
pub use health::check_health;
pub use llm_trait::LlmClient;
pub use processor::{AssembledOutput, ChunkOutcome, ChunkProcessor, ProcessedChunk, CHUNK_JOINER};
pub use prompts::{build_prompt, instruction_for, instruction_for_name, MAX_GENERATED_TOKENS, TEMPERATURE};
pub use types::{
    GenerateOptions, GenerateRequest, GenerateResponse, HealthReport, HealthStatus, ModelTag,
    TagsResponse,
};

/// Re-exported so callers can cancel chunk streams without depending on tokio-util
pub use tokio_util::sync::CancellationToken;
