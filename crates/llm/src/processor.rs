//! Sequential chunk enhancement with per-chunk fallback

use futures::stream::{BoxStream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use textconvert_common::{AppConfig, OutputFormat};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::chunking::TextChunk;
use crate::llm_trait::LlmClient;
use crate::prompts::{build_prompt, generate_options};
use crate::types::GenerateRequest;

/// Separator between processed chunks in the assembled output
pub const CHUNK_JOINER: &str = "\n\n";

/// How a chunk's text was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// Text produced by the completion service
    Enhanced,
    /// Completion failed; text is the original chunk
    Fallback { reason: String },
}

/// Completion output for one chunk
#[derive(Debug, Clone)]
pub struct ProcessedChunk {
    pub index: usize,
    pub total: usize,
    pub text: String,
    pub outcome: ChunkOutcome,
}

impl ProcessedChunk {
    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, ChunkOutcome::Fallback { .. })
    }
}

/// Ordered join of processed chunks
#[derive(Debug, Clone, Default)]
pub struct AssembledOutput {
    pub text: String,

    /// Chunks that made it into `text`
    pub chunks: usize,

    /// Chunks that fell back to their original text
    pub fallbacks: usize,
}

impl AssembledOutput {
    pub fn from_chunks(processed: &[ProcessedChunk]) -> Self {
        Self {
            text: processed
                .iter()
                .map(|c| c.text.as_str())
                .collect::<Vec<_>>()
                .join(CHUNK_JOINER),
            chunks: processed.len(),
            fallbacks: processed.iter().filter(|c| c.is_fallback()).count(),
        }
    }
}

/// Drives chunks through the completion service one at a time
#[derive(Clone)]
pub struct ChunkProcessor {
    client: Arc<dyn LlmClient>,
    model: String,
    chunk_delay: Duration,
}

impl ChunkProcessor {
    /// Create new processor
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>, chunk_delay: Duration) -> Self {
        Self {
            client,
            model: model.into(),
            chunk_delay,
        }
    }

    /// Create processor using the configured model and pause
    pub fn from_config(client: Arc<dyn LlmClient>, config: &AppConfig) -> Self {
        Self::new(client, config.ollama_model.clone(), config.chunk_delay())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn client(&self) -> &Arc<dyn LlmClient> {
        &self.client
    }

    /// One completion call; any failure yields the original text
    async fn complete(&self, prompt: String, original: &str) -> (String, ChunkOutcome) {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt,
            stream: Some(false),
            options: Some(generate_options()),
        };

        match self.client.generate(request).await {
            Ok(text) => (text, ChunkOutcome::Enhanced),
            Err(e) => (
                original.to_string(),
                ChunkOutcome::Fallback {
                    reason: e.to_string(),
                },
            ),
        }
    }

    async fn process_chunk(
        &self,
        chunk: &TextChunk,
        format: OutputFormat,
        guidance: &str,
    ) -> ProcessedChunk {
        debug!("Processing chunk {}/{}", chunk.ordinal(), chunk.total);

        let prompt = build_prompt(
            format,
            guidance,
            Some((chunk.ordinal(), chunk.total)),
            &chunk.text,
        );
        let (text, outcome) = self.complete(prompt, &chunk.text).await;

        if let ChunkOutcome::Fallback { reason } = &outcome {
            warn!(
                "Chunk {}/{} fell back to original text: {}",
                chunk.ordinal(),
                chunk.total,
                reason
            );
        }

        ProcessedChunk {
            index: chunk.index,
            total: chunk.total,
            text,
            outcome,
        }
    }

    /// Lazily process chunks in order, pausing between submissions
    ///
    /// No chunk is submitted once `cancel` fires or the stream is dropped;
    /// a call in flight at cancellation time is abandoned without yielding.
    pub fn stream(
        &self,
        chunks: Vec<TextChunk>,
        format: OutputFormat,
        guidance: String,
        cancel: CancellationToken,
    ) -> BoxStream<'static, ProcessedChunk> {
        let processor = self.clone();

        let pipeline = async_stream::stream! {
            for chunk in chunks {
                if cancel.is_cancelled() {
                    info!("Chunk processing cancelled before chunk {}/{}", chunk.ordinal(), chunk.total);
                    break;
                }

                let processed = tokio::select! {
                    _ = cancel.cancelled() => None,
                    processed = processor.process_chunk(&chunk, format, &guidance) => Some(processed),
                };
                let Some(processed) = processed else {
                    info!("Chunk processing cancelled during chunk {}/{}", chunk.ordinal(), chunk.total);
                    break;
                };

                yield processed;

                if !chunk.is_last() && !processor.chunk_delay.is_zero() {
                    let cancelled = tokio::select! {
                        _ = cancel.cancelled() => true,
                        _ = tokio::time::sleep(processor.chunk_delay) => false,
                    };
                    if cancelled {
                        break;
                    }
                }
            }
        };

        pipeline.boxed()
    }

    /// Process every chunk and join the results
    pub async fn process_all(
        &self,
        chunks: Vec<TextChunk>,
        format: OutputFormat,
        guidance: &str,
        cancel: CancellationToken,
    ) -> AssembledOutput {
        let total = chunks.len();
        info!("Processing {} chunk(s) as {}", total, format);

        let processed: Vec<ProcessedChunk> = self
            .stream(chunks, format, guidance.to_string(), cancel)
            .collect()
            .await;

        let output = AssembledOutput::from_chunks(&processed);
        info!(
            "Assembled {}/{} chunk(s), {} fallback(s), {} chars",
            output.chunks,
            total,
            output.fallbacks,
            output.text.len()
        );
        output
    }

    /// Single completion call without chunking or pacing (preview path)
    pub async fn process_single(
        &self,
        text: &str,
        format: OutputFormat,
        guidance: &str,
    ) -> ProcessedChunk {
        let prompt = build_prompt(format, guidance, None, text);
        let (processed, outcome) = self.complete(prompt, text).await;

        if let ChunkOutcome::Fallback { reason } = &outcome {
            warn!("Preview fell back to original text: {}", reason);
        }

        ProcessedChunk {
            index: 0,
            total: 1,
            text: processed,
            outcome,
        }
    }
}
