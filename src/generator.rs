//! Fans the transcript out to the two document variants.
//!
//! Variants run concurrently and independently: one variant failing at the
//! generation or compile step never blocks or invalidates the sibling.
//! Outcomes are always reported in fixed variant order.

use std::sync::Arc;

use log::{info, warn};

use crate::clients::{GenerationClient, GenerationError};
use crate::compiler::{CompileError, LatexCompiler};
use crate::prompts;
use crate::transcriber::Transcript;

/// One of the two fixed document flavors generated from the same transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum DocVariant {
    #[strum(serialize = "study-notes")]
    StudyNotes,
    #[strum(serialize = "spoken-script")]
    SpokenStyle,
}

impl DocVariant {
    pub const ALL: [DocVariant; 2] = [DocVariant::StudyNotes, DocVariant::SpokenStyle];

    /// File stem for downloads.
    pub fn key(self) -> &'static str {
        match self {
            DocVariant::StudyNotes => "study-notes",
            DocVariant::SpokenStyle => "spoken-script",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DocVariant::StudyNotes => "LaTeX – notatki",
            DocVariant::SpokenStyle => "LaTeX – zapis mówiony",
        }
    }

    /// Variant-specific instruction template for the generation service.
    pub fn instructions(self) -> String {
        match self {
            DocVariant::StudyNotes => prompts::study_notes_instructions(),
            DocVariant::SpokenStyle => prompts::spoken_style_instructions(),
        }
    }

    pub fn latex_filename(self) -> String {
        format!("{}.tex", self.key())
    }

    pub fn pdf_filename(self) -> String {
        format!("{}.pdf", self.key())
    }
}

/// Transcript plus variant selector; each request is independent.
#[derive(Debug, Clone)]
pub struct DocumentRequest {
    pub variant: DocVariant,
    pub transcript: Transcript,
}

/// Generated LaTeX source plus the compile result for one variant.
///
/// The source survives a compile failure so the caller can still offer the
/// `.tex` download alongside the diagnostic.
#[derive(Debug)]
pub struct DocumentResult {
    pub variant: DocVariant,
    pub latex: String,
    pub latex_filename: String,
    pub pdf_filename: String,
    pub pdf: Result<Vec<u8>, CompileError>,
}

/// Per-variant outcome of the generation stage.
#[derive(Debug)]
pub struct DocumentOutcome {
    pub variant: DocVariant,
    pub result: Result<DocumentResult, GenerationError>,
}

/// Generation stage: drives both variant requests and their compiles.
pub struct DocumentGenerator {
    client: Arc<dyn GenerationClient>,
    compiler: LatexCompiler,
}

impl DocumentGenerator {
    pub fn new(client: Arc<dyn GenerationClient>, compiler: LatexCompiler) -> Self {
        Self { client, compiler }
    }

    /// Generate and compile both variants concurrently.
    ///
    /// Always returns one outcome per variant, in `DocVariant::ALL` order,
    /// regardless of completion order or failures.
    pub async fn generate_all(&self, transcript: &Transcript) -> Vec<DocumentOutcome> {
        let mut handles = Vec::with_capacity(DocVariant::ALL.len());
        for variant in DocVariant::ALL {
            let request = DocumentRequest {
                variant,
                transcript: transcript.clone(),
            };
            let client = Arc::clone(&self.client);
            let compiler = self.compiler.clone();
            handles.push((
                variant,
                tokio::spawn(async move { generate_one(request, client, compiler).await }),
            ));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (variant, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(GenerationError::Worker(e.to_string())),
            };
            outcomes.push(DocumentOutcome { variant, result });
        }
        outcomes
    }
}

async fn generate_one(
    request: DocumentRequest,
    client: Arc<dyn GenerationClient>,
    compiler: LatexCompiler,
) -> Result<DocumentResult, GenerationError> {
    let variant = request.variant;
    info!("Generating {} document", variant);

    let input = prompts::wrap_transcript(request.transcript.as_str());
    let latex = client.generate(&variant.instructions(), &input).await?;

    let pdf = compiler.compile(&latex).await;
    if let Err(e) = &pdf {
        warn!("Compile failed for {}: {}", variant, e);
    }

    Ok(DocumentResult {
        variant,
        latex_filename: variant.latex_filename(),
        pdf_filename: variant.pdf_filename(),
        latex,
        pdf,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Returns a tiny document for every variant.
    struct FakeGenerator;

    #[async_trait]
    impl GenerationClient for FakeGenerator {
        async fn generate(
            &self,
            instructions: &str,
            input: &str,
        ) -> Result<String, GenerationError> {
            assert!(input.starts_with("BEGIN_TRANSCRIPT"));
            let marker = if instructions.contains("study notes") {
                "notes"
            } else {
                "script"
            };
            Ok(format!("\\documentclass{{article}} % {}", marker))
        }
    }

    /// Fails exactly one variant's generation call.
    struct HalfFailingGenerator;

    #[async_trait]
    impl GenerationClient for HalfFailingGenerator {
        async fn generate(
            &self,
            instructions: &str,
            _input: &str,
        ) -> Result<String, GenerationError> {
            if instructions.contains("study notes") {
                Err(GenerationError::ApiError("simulated outage".to_string()))
            } else {
                Ok("\\documentclass{article}".to_string())
            }
        }
    }

    fn broken_compiler() -> LatexCompiler {
        LatexCompiler::new("definitely-not-a-latex-binary")
    }

    #[tokio::test]
    async fn test_compile_failure_does_not_suppress_either_variant() {
        let generator = DocumentGenerator::new(Arc::new(FakeGenerator), broken_compiler());
        let outcomes = generator
            .generate_all(&Transcript::new("lecture text".to_string()))
            .await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].variant, DocVariant::StudyNotes);
        assert_eq!(outcomes[1].variant, DocVariant::SpokenStyle);
        for outcome in &outcomes {
            let result = outcome.result.as_ref().unwrap();
            assert!(!result.latex.is_empty());
            assert!(matches!(
                result.pdf,
                Err(CompileError::ToolchainNotFound { .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_generation_failure_is_isolated_to_its_variant() {
        let generator = DocumentGenerator::new(Arc::new(HalfFailingGenerator), broken_compiler());
        let outcomes = generator
            .generate_all(&Transcript::new("lecture text".to_string()))
            .await;

        assert!(outcomes[0].result.is_err());
        let spoken = outcomes[1].result.as_ref().unwrap();
        assert_eq!(spoken.variant, DocVariant::SpokenStyle);
        assert_eq!(spoken.latex, "\\documentclass{article}");
    }

    #[test]
    fn test_variant_filenames() {
        assert_eq!(DocVariant::StudyNotes.latex_filename(), "study-notes.tex");
        assert_eq!(DocVariant::SpokenStyle.pdf_filename(), "spoken-script.pdf");
        assert_eq!(DocVariant::StudyNotes.to_string(), "study-notes");
    }
}
