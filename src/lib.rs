//! Lektara - turns long lecture recordings into two typeset documents:
//! structured study notes and a cleaned spoken-style script.
//!
//! The pipeline splits oversized audio into API-size-compliant segments,
//! transcribes them concurrently with ordered reassembly and progress/ETA
//! reporting, then fans the transcript out to two independent document
//! generations, each compiled to PDF. The embedding UI supplies audio bytes
//! and a progress sink and gets back immutable value objects; no state
//! outlives a single invocation.

pub mod audio;
pub mod clients;
pub mod compiler;
pub mod config;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod transcriber;

pub use audio::{AudioFormat, AudioSegment, ChunkError};
pub use clients::{GenerationError, OpenAIClient, TranscriptionError};
pub use compiler::{CompileError, LatexCompiler};
pub use config::{ApiConfig, PipelineConfig};
pub use error::PipelineError;
pub use generator::{DocVariant, DocumentOutcome, DocumentResult};
pub use pipeline::{Pipeline, PipelineOutput};
pub use progress::ProgressUpdate;
pub use transcriber::{Transcriber, Transcript};
