//! End-to-end orchestration: audio bytes in, transcript plus two typeset
//! documents out.
//!
//! The pipeline owns no state beyond one `run` invocation. Chunking and
//! transcription failures are fatal; generation and compile failures are
//! scoped to their variant and reported in the per-variant outcomes, so
//! partial success is a first-class result.

use std::sync::Arc;

use log::info;
use tokio_util::sync::CancellationToken;

use crate::audio::{self, AudioFormat};
use crate::clients::{GenerationClient, OpenAIClient, TranscriptionClient};
use crate::compiler::LatexCompiler;
use crate::config::{ApiConfig, PipelineConfig};
use crate::error::PipelineError;
use crate::generator::{DocumentGenerator, DocumentOutcome};
use crate::progress::ProgressUpdate;
use crate::transcriber::{Transcriber, Transcript};

/// Everything one invocation returns to the caller: the merged transcript
/// and one outcome per document variant, ready for download.
#[derive(Debug)]
pub struct PipelineOutput {
    pub transcript: Transcript,
    pub documents: Vec<DocumentOutcome>,
}

/// The audio-to-documents pipeline.
pub struct Pipeline {
    transcriber: Transcriber,
    generator: DocumentGenerator,
    config: PipelineConfig,
}

impl Pipeline {
    /// Build a pipeline backed by the OpenAI service for both remote
    /// boundaries. Fails if the HTTP client cannot be constructed.
    pub fn new(api: ApiConfig, config: PipelineConfig) -> Result<Self, reqwest::Error> {
        let client = Arc::new(OpenAIClient::new(api.api_key)?);
        Ok(Self::with_clients(
            Arc::clone(&client) as Arc<dyn TranscriptionClient>,
            client as Arc<dyn GenerationClient>,
            config,
        ))
    }

    /// Build a pipeline with explicit service clients. Tests and alternative
    /// providers hook in here.
    pub fn with_clients(
        transcription: Arc<dyn TranscriptionClient>,
        generation: Arc<dyn GenerationClient>,
        config: PipelineConfig,
    ) -> Self {
        let transcriber =
            Transcriber::new(transcription).with_max_in_flight(config.max_in_flight);
        let compiler = LatexCompiler::new(config.latex_command.clone());
        let generator = DocumentGenerator::new(generation, compiler);
        Self {
            transcriber,
            generator,
            config,
        }
    }

    /// Run the whole pipeline on one recording.
    ///
    /// `format_hint` is the upload's extension or MIME type. `on_progress`
    /// receives one update per resolved transcription segment. `cancel`
    /// abandons in-flight work cooperatively.
    pub async fn run<F>(
        &self,
        audio_bytes: &[u8],
        format_hint: &str,
        bias_prompt: Option<&str>,
        cancel: &CancellationToken,
        on_progress: F,
    ) -> Result<PipelineOutput, PipelineError>
    where
        F: FnMut(ProgressUpdate),
    {
        let format = AudioFormat::from_hint(format_hint)?;
        let segments = audio::split(audio_bytes, format, self.config.max_chunk_bytes)?;

        let transcript = self
            .transcriber
            .transcribe(segments, bias_prompt, cancel, on_progress)
            .await?;
        if transcript.is_empty() {
            return Err(PipelineError::EmptyTranscript);
        }
        info!("Transcript assembled: {} characters", transcript.as_str().len());

        let documents = self.generator.generate_all(&transcript).await;
        Ok(PipelineOutput {
            transcript,
            documents,
        })
    }
}
