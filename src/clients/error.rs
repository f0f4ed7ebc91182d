#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("Segment too large: {size_bytes} bytes")]
    SegmentTooLarge { size_bytes: u64 },
    #[error("API error: {0}")]
    ApiError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("API key not configured")]
    ApiKeyMissing,
    #[error("Transcription of segment {segment_index} failed: {cause}")]
    Segment {
        segment_index: usize,
        #[source]
        cause: Box<TranscriptionError>,
    },
    #[error("Transcription cancelled")]
    Cancelled,
    #[error("No segments to transcribe")]
    NoSegments,
    #[error("Transcription worker failed: {0}")]
    Worker(String),
}

impl TranscriptionError {
    /// Returns a user-friendly error message suitable for display in the UI
    pub fn user_message(&self) -> String {
        match self {
            TranscriptionError::SegmentTooLarge { size_bytes } => {
                let mb = size_bytes / (1024 * 1024);
                format!("Audio segment too large ({}MB). Maximum is 25MB.", mb)
            }
            TranscriptionError::ApiError(msg) => {
                // Parse for specific errors
                if msg.contains("429") || msg.to_lowercase().contains("rate limit") {
                    "Rate limit reached. Please wait and retry.".to_string()
                } else if msg.contains("401") {
                    "Invalid API key. Check your settings.".to_string()
                } else {
                    format!("Transcription failed: {}", msg)
                }
            }
            TranscriptionError::IoError(_) => "Failed to read audio data. Please try again.".to_string(),
            TranscriptionError::ApiKeyMissing => {
                "API key not configured. Please add it in Preferences.".to_string()
            }
            TranscriptionError::Segment {
                segment_index,
                cause,
            } => {
                format!(
                    "Segment {} of the recording failed. {}",
                    segment_index + 1,
                    cause.user_message()
                )
            }
            TranscriptionError::Cancelled => "Transcription was cancelled.".to_string(),
            TranscriptionError::NoSegments => "No audio to transcribe.".to_string(),
            TranscriptionError::Worker(_) => "Transcription failed unexpectedly. Try again.".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Generation returned an empty document")]
    EmptyOutput,
    #[error("API key not configured")]
    ApiKeyMissing,
    #[error("Generation worker failed: {0}")]
    Worker(String),
}
