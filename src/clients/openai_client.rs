//! OpenAI implementation of the transcription and generation boundaries.

use std::time::Duration;

use async_trait::async_trait;
use log::{error, info};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use super::client::{GenerationClient, TranscriptionClient};
use super::error::{GenerationError, TranscriptionError};

const OPENAI_TRANSCRIPTION_URL: &str = "https://api.openai.com/v1/audio/transcriptions";
const OPENAI_RESPONSES_URL: &str = "https://api.openai.com/v1/responses";
const TRANSCRIPTION_MODEL: &str = "gpt-4o-transcribe";
const GENERATION_MODEL: &str = "gpt-4.1";
/// Document generation rewrites a full lecture; give it room.
const REQUEST_TIMEOUT_SECS: u64 = 300;
const MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024; // API hard limit

/// OpenAI API client covering both pipeline boundaries: the audio
/// transcriptions endpoint and the Responses endpoint.
pub struct OpenAIClient {
    http: reqwest::Client,
    api_key: SecretString,
}

impl OpenAIClient {
    /// Fails if the TLS backend cannot be initialized.
    pub fn new(api_key: SecretString) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, api_key })
    }
}

#[async_trait]
impl TranscriptionClient for OpenAIClient {
    async fn transcribe_segment(
        &self,
        audio: Vec<u8>,
        filename: String,
        prompt: Option<&str>,
    ) -> Result<String, TranscriptionError> {
        if audio.len() as u64 > MAX_UPLOAD_BYTES {
            return Err(TranscriptionError::SegmentTooLarge {
                size_bytes: audio.len() as u64,
            });
        }

        let audio_part = reqwest::multipart::Part::bytes(audio)
            .file_name(filename)
            .mime_str("audio/wav")
            .map_err(|e| {
                TranscriptionError::ApiError(format!("Failed to create audio part: {}", e))
            })?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", audio_part)
            .text("model", TRANSCRIPTION_MODEL)
            .text("temperature", "0.0")
            .text("response_format", "json");
        if let Some(prompt) = prompt {
            form = form.text("prompt", prompt.to_string());
        }

        let response = self
            .http
            .post(OPENAI_TRANSCRIPTION_URL)
            .bearer_auth(self.api_key.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("API request error: {}", e);
                TranscriptionError::ApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("API error response ({}): {}", status, error_text);
            return Err(TranscriptionError::ApiError(format!(
                "API returned status {}: {}",
                status, error_text
            )));
        }

        let json: Value = response.json().await.map_err(|e| {
            error!("Failed to parse response: {}", e);
            TranscriptionError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let text = json["text"].as_str().unwrap_or("").to_string();
        info!("Transcription successful: {} characters", text.len());
        Ok(text)
    }
}

#[async_trait]
impl GenerationClient for OpenAIClient {
    async fn generate(
        &self,
        instructions: &str,
        input: &str,
    ) -> Result<String, GenerationError> {
        let payload = json!({
            "model": GENERATION_MODEL,
            "instructions": instructions,
            "input": input,
        });

        let response = self
            .http
            .post(OPENAI_RESPONSES_URL)
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("Generation request failed: {}", e);
                GenerationError::ApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error body".to_string());
            error!("Generation API error ({}): {}", status, body);
            return Err(GenerationError::ApiError(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let json: Value = response.json().await.map_err(|e| {
            error!("Failed to parse generation response JSON: {}", e);
            GenerationError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let text = extract_output_text(&json).ok_or(GenerationError::EmptyOutput)?;
        info!("Generation successful: {} characters", text.len());
        Ok(text)
    }
}

/// Pull the generated text out of a Responses API payload.
fn extract_output_text(response_json: &Value) -> Option<String> {
    // Some API shapes include top-level "output_text"
    if let Some(text) = response_json.get("output_text").and_then(Value::as_str) {
        let text = text.trim();
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }

    // General responses shape:
    // output[].content[] where content.type == "output_text" and content.text is the actual text.
    let output = response_json.get("output")?.as_array()?;
    let mut merged = String::new();

    for item in output {
        let content = match item.get("content").and_then(Value::as_array) {
            Some(content) => content,
            None => continue,
        };

        for content_item in content {
            if content_item.get("type").and_then(Value::as_str) != Some("output_text") {
                continue;
            }
            let text = match content_item.get("text").and_then(Value::as_str) {
                Some(text) => text.trim(),
                None => continue,
            };
            if text.is_empty() {
                continue;
            }
            if !merged.is_empty() {
                merged.push('\n');
            }
            merged.push_str(text);
        }
    }

    if merged.is_empty() {
        None
    } else {
        Some(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_timeout() {
        let client = OpenAIClient::new(SecretString::from("sk-test".to_string()));
        assert!(client.is_ok());
    }

    #[test]
    fn test_extract_top_level_output_text() {
        let json = json!({ "output_text": "  \\documentclass{article}  " });
        assert_eq!(
            extract_output_text(&json).unwrap(),
            "\\documentclass{article}"
        );
    }

    #[test]
    fn test_extract_nested_output_blocks() {
        let json = json!({
            "output": [
                { "content": [
                    { "type": "output_text", "text": "part one" },
                    { "type": "reasoning", "text": "ignored" }
                ]},
                { "content": [
                    { "type": "output_text", "text": "part two" }
                ]}
            ]
        });
        assert_eq!(extract_output_text(&json).unwrap(), "part one\npart two");
    }

    #[test]
    fn test_extract_empty_payload() {
        assert_eq!(extract_output_text(&json!({})), None);
        assert_eq!(extract_output_text(&json!({ "output": [] })), None);
    }
}
