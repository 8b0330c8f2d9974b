//! Caller-facing request/response contract.
//!
//! [`CodeAssistant`] is the seam between callers and whatever fulfils
//! analysis and generation. [`LocalAssistant`] answers from the in-process
//! rule and template catalogues. Input validation lives here, not in the
//! orchestrators.

use std::sync::Arc;

use thiserror::Error;

use crate::analyzer::{AnalysisResult, Analyzer};
use crate::detect::RuleCatalogue;
use crate::generate::{GenerationCatalogue, Generator};
use crate::score::ScoringConfig;

/// Errors surfaced to assistant callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssistError {
    #[error("invalid input: {field} must not be empty")]
    InvalidInput { field: &'static str },
}

/// Analysis and generation behind one interface.
///
/// Implementations must treat unknown languages as valid input.
pub trait CodeAssistant: Send + Sync {
    fn analyze(&self, code: &str, language: &str) -> Result<AnalysisResult, AssistError>;

    fn generate(&self, prompt: &str, language: &str) -> Result<String, AssistError>;
}

/// Assistant backed by the local catalogues.
#[derive(Debug, Clone)]
pub struct LocalAssistant {
    analyzer: Analyzer,
    generator: Generator,
}

impl LocalAssistant {
    pub fn new(analyzer: Analyzer, generator: Generator) -> Self {
        Self {
            analyzer,
            generator,
        }
    }

    /// Build from shared catalogues.
    pub fn from_catalogues(
        rules: Arc<RuleCatalogue>,
        templates: Arc<GenerationCatalogue>,
        scoring: ScoringConfig,
    ) -> Self {
        Self::new(Analyzer::new(rules, scoring), Generator::new(templates))
    }

    /// Built-in rules, templates and default scoring.
    pub fn builtin() -> Self {
        Self::new(Analyzer::builtin(), Generator::builtin())
    }
}

fn require_non_blank(value: &str, field: &'static str) -> Result<(), AssistError> {
    if value.trim().is_empty() {
        return Err(AssistError::InvalidInput { field });
    }
    Ok(())
}

impl CodeAssistant for LocalAssistant {
    fn analyze(&self, code: &str, language: &str) -> Result<AnalysisResult, AssistError> {
        require_non_blank(code, "code")?;
        Ok(self.analyzer.analyze(code, language))
    }

    fn generate(&self, prompt: &str, language: &str) -> Result<String, AssistError> {
        require_non_blank(prompt, "prompt")?;
        Ok(self.generator.generate(prompt, language))
    }
}
