use derive_more::{Display, From};

use crate::audio::ChunkError;
use crate::clients::TranscriptionError;

/// Fatal pipeline errors. Variant-scoped generation/compile failures are not
/// represented here; they ride along in the per-variant outcomes.
#[derive(Debug, Display, From)]
pub enum PipelineError {
    #[from]
    #[display("{_0}")]
    Chunk(ChunkError),

    #[from]
    #[display("{_0}")]
    Transcription(TranscriptionError),

    #[display("The transcription service returned no text for this audio")]
    EmptyTranscript,
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Chunk(e) => Some(e),
            PipelineError::Transcription(e) => Some(e),
            PipelineError::EmptyTranscript => None,
        }
    }
}

impl PipelineError {
    /// Returns a user-friendly error message suitable for display in the UI
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Chunk(ChunkError::EmptyInput) => {
                "The uploaded file contains no audio.".to_string()
            }
            PipelineError::Chunk(ChunkError::UnsupportedFormat { hint }) => {
                format!("Unsupported audio type '{}'. Please upload a WAV file.", hint)
            }
            PipelineError::Chunk(e) => format!("Could not prepare the audio: {}", e),
            PipelineError::Transcription(e) => e.user_message(),
            PipelineError::EmptyTranscript => {
                "The transcription API did not return any text for this audio.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_error_converts_and_displays() {
        let err: PipelineError = ChunkError::EmptyInput.into();
        assert_eq!(err.to_string(), "No audio to process");
        assert!(err.user_message().contains("no audio"));
    }

    #[test]
    fn test_transcription_error_user_message_passes_through() {
        let err: PipelineError = TranscriptionError::ApiKeyMissing.into();
        assert!(err.user_message().contains("API key"));
    }
}
