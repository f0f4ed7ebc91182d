//! Remote-service boundaries for transcription and document generation.
//!
//! Both traits abstract a single request/response exchange so the pipeline
//! can be exercised against fakes in tests and against different providers
//! in production.

use async_trait::async_trait;

use super::error::{GenerationError, TranscriptionError};

/// Speech-to-text boundary: one audio segment in, its transcript text out.
#[async_trait]
pub trait TranscriptionClient: Send + Sync {
    /// Transcribe a single audio segment.
    ///
    /// # Arguments
    /// * `audio` - segment bytes, a standalone playable file under the API limit
    /// * `filename` - upload filename carrying the container extension
    /// * `prompt` - optional bias prompt, forwarded verbatim for every segment
    async fn transcribe_segment(
        &self,
        audio: Vec<u8>,
        filename: String,
        prompt: Option<&str>,
    ) -> Result<String, TranscriptionError>;
}

/// Text-generation boundary: instruction template plus input text in,
/// generated document source out.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, instructions: &str, input: &str)
        -> Result<String, GenerationError>;
}
