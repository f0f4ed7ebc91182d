//! Compiles generated LaTeX source to PDF via the local toolchain.
//!
//! Each compile runs in its own `tempfile::TempDir`, so toolchain auxiliary
//! files never leak and concurrent compiles never share a working directory.
//! The directory is removed on every exit path when the guard drops.

use std::io::ErrorKind;

use log::{debug, info, warn};
use tokio::process::Command;

const TEX_FILENAME: &str = "document.tex";
const PDF_FILENAME: &str = "document.pdf";
/// First pass collects TOC/aux data, second pass resolves it.
const COMPILE_PASSES: u32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Typesetting toolchain '{command}' could not be started: {cause}")]
    ToolchainNotFound { command: String, cause: String },
    #[error("Typesetting failed: {diagnostic}")]
    ToolchainFailed { diagnostic: String },
    #[error("Toolchain reported success but produced no PDF")]
    MissingArtifact,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invokes the LaTeX toolchain on in-memory source text.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    command: String,
}

impl Default for LatexCompiler {
    fn default() -> Self {
        Self::new("pdflatex")
    }
}

impl LatexCompiler {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Compile `source` and return the PDF bytes.
    ///
    /// Writes the source into a scratch directory, runs the toolchain twice
    /// with captured output, and reads the artifact back. A non-zero exit
    /// carries the toolchain diagnostic; a clean exit without an artifact is
    /// its own error.
    pub async fn compile(&self, source: &str) -> Result<Vec<u8>, CompileError> {
        let workdir = tempfile::tempdir()?;
        let tex_path = workdir.path().join(TEX_FILENAME);
        tokio::fs::write(&tex_path, source).await?;

        for pass in 1..=COMPILE_PASSES {
            debug!("Running {} pass {}/{}", self.command, pass, COMPILE_PASSES);
            let output = Command::new(&self.command)
                .arg("-halt-on-error")
                .arg("-interaction=nonstopmode")
                .arg(TEX_FILENAME)
                .current_dir(workdir.path())
                .output()
                .await
                .map_err(|e| {
                    if e.kind() == ErrorKind::NotFound {
                        warn!("Toolchain '{}' not found", self.command);
                    }
                    CompileError::ToolchainNotFound {
                        command: self.command.clone(),
                        cause: e.to_string(),
                    }
                })?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let stdout = String::from_utf8_lossy(&output.stdout);
                let diagnostic = if stderr.trim().is_empty() {
                    stdout.trim().to_string()
                } else {
                    stderr.trim().to_string()
                };
                return Err(CompileError::ToolchainFailed { diagnostic });
            }
        }

        let pdf_path = workdir.path().join(PDF_FILENAME);
        let bytes = match tokio::fs::read(&pdf_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CompileError::MissingArtifact)
            }
            Err(e) => return Err(e.into()),
        };

        info!("Compiled {} bytes of PDF", bytes.len());
        Ok(bytes)
    }
}
