use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Stay below the 25 MB API upload limit to leave container headroom.
pub const DEFAULT_MAX_CHUNK_BYTES: usize = 24 * 1024 * 1024;
/// Cap simultaneous segment uploads for long recordings.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;
const DEFAULT_LATEX_COMMAND: &str = "pdflatex";

/// Credentials for the remote transcription/generation service.
pub struct ApiConfig {
    pub api_key: SecretString,
}

impl ApiConfig {
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }

    /// Load the API key from `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self, MissingApiKey> {
        match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(SecretString::from(key))),
            _ => Err(MissingApiKey),
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Set the OPENAI_API_KEY environment variable or pass the key explicitly")]
pub struct MissingApiKey;

/// Tunables for one pipeline instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    /// Per-segment byte budget, strictly below the service's hard limit
    pub max_chunk_bytes: usize,
    /// Maximum concurrent transcription uploads
    pub max_in_flight: usize,
    /// Typesetting toolchain executable
    pub latex_command: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_chunk_bytes: DEFAULT_MAX_CHUNK_BYTES,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            latex_command: DEFAULT_LATEX_COMMAND.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_stay_under_api_limit() {
        let config = PipelineConfig::default();
        assert!(config.max_chunk_bytes < 25 * 1024 * 1024);
        assert_eq!(config.latex_command, "pdflatex");
    }

    #[test]
    fn test_api_config_debug_redacts_key() {
        let config = ApiConfig::new(SecretString::from("sk-secret".to_string()));
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("sk-secret"));
    }

    #[test]
    fn test_pipeline_config_roundtrips_through_serde() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
