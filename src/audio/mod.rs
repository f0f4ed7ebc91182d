//! Audio ingestion: container hints and size-bounded chunking.

mod chunker;

pub use chunker::{split, AudioSegment, ChunkError, MIN_CHUNK_SECS};

/// Container formats the chunker can slice natively.
///
/// The recording side of the house produces WAV; anything else would need an
/// external decoder before it reaches this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
}

impl AudioFormat {
    /// Resolve a file-extension or MIME hint to a supported format.
    ///
    /// Accepts e.g. `"wav"`, `".wav"`, `"audio/wav"`, `"audio/x-wav"`.
    pub fn from_hint(hint: &str) -> Result<Self, ChunkError> {
        let normalized = hint.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "wav" | "audio/wav" | "audio/x-wav" | "audio/wave" => Ok(AudioFormat::Wav),
            _ => Err(ChunkError::UnsupportedFormat {
                hint: hint.to_string(),
            }),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_hints_resolve() {
        assert_eq!(AudioFormat::from_hint("wav").unwrap(), AudioFormat::Wav);
        assert_eq!(AudioFormat::from_hint(".WAV").unwrap(), AudioFormat::Wav);
        assert_eq!(
            AudioFormat::from_hint("audio/x-wav").unwrap(),
            AudioFormat::Wav
        );
    }

    #[test]
    fn test_unknown_hint_is_rejected() {
        let err = AudioFormat::from_hint("m4a").unwrap_err();
        assert!(matches!(err, ChunkError::UnsupportedFormat { .. }));
    }
}
