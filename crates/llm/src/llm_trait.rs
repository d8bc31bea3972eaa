use async_trait::async_trait;
use textconvert_common::Result;

use crate::types::GenerateRequest;

/// Common trait for completion-service clients
///
/// Every failure is returned as `Err`; callers decide whether it is fatal.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate text from a prompt (single attempt, no streaming)
    async fn generate(&self, request: GenerateRequest) -> Result<String>;

    /// Names of the models installed on the service
    async fn list_models(&self) -> Result<Vec<String>>;

    /// Base URL of the service
    fn host(&self) -> &str;
}
