mod client;
mod error;
mod openai_client;

// Re-export public types
pub use client::{GenerationClient, TranscriptionClient};
pub use error::{GenerationError, TranscriptionError};
pub use openai_client::OpenAIClient;
