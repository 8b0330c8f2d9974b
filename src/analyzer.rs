//! Analysis orchestration: detection, scoring and summary in one call.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use tracing::debug;

use crate::detect::{Defect, DefectCategory, Detector, RuleCatalogue};
use crate::language::Language;
use crate::score::{QualityBand, ScoringConfig};

/// Outcome of analyzing one snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub has_errors: bool,
    /// Defects in detection order.
    pub errors: Vec<Defect>,
    pub summary: String,
    /// Score in `[0, 100]`.
    pub code_quality: u8,
    /// Language-level advice, independent of the detected defects.
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    pub fn quality_band(&self) -> QualityBand {
        QualityBand::from_score(self.code_quality)
    }

    /// The category with the most defects; ties go to the earliest detected.
    pub fn dominant_category(&self) -> Option<DefectCategory> {
        dominant_category(&self.errors)
    }
}

/// Analyzes snippets against an injected rule catalogue.
#[derive(Debug, Clone)]
pub struct Analyzer {
    detector: Detector,
    scoring: ScoringConfig,
}

impl Analyzer {
    pub fn new(catalogue: Arc<RuleCatalogue>, scoring: ScoringConfig) -> Self {
        Self {
            detector: Detector::new(catalogue),
            scoring,
        }
    }

    /// An analyzer over the built-in rules with default scoring.
    pub fn builtin() -> Self {
        Self::new(Arc::new(RuleCatalogue::builtin()), ScoringConfig::default())
    }

    /// Analyze a snippet.
    ///
    /// Blank input is not rejected here: it has nothing to detect and scores
    /// as clean. Callers that must refuse blank input validate before calling
    /// (see [`crate::assistant::LocalAssistant`]).
    pub fn analyze(&self, code: &str, language: &str) -> AnalysisResult {
        let lang = Language::parse(language);
        let errors = if code.trim().is_empty() {
            Vec::new()
        } else {
            self.detector.detect(code, language)
        };

        let code_quality = self.scoring.score(errors.len());
        let display_name = lang
            .map(|l| l.as_str().to_string())
            .unwrap_or_else(|| language.trim().to_string());
        let summary = summarize(&errors, &display_name);
        let suggestions = language_suggestions(lang)
            .iter()
            .map(|s| s.to_string())
            .collect();

        debug!(
            language = %display_name,
            defects = errors.len(),
            code_quality,
            "analysis complete"
        );

        AnalysisResult {
            has_errors: !errors.is_empty(),
            errors,
            summary,
            code_quality,
            suggestions,
        }
    }
}

fn dominant_category(defects: &[Defect]) -> Option<DefectCategory> {
    let mut counts: Vec<(DefectCategory, usize)> = Vec::new();
    for defect in defects {
        let category = defect.category();
        match counts.iter_mut().find(|(c, _)| *c == category) {
            Some((_, n)) => *n += 1,
            None => counts.push((category, 1)),
        }
    }

    let max = counts.iter().map(|(_, n)| *n).max()?;
    counts
        .into_iter()
        .find(|(_, n)| *n == max)
        .map(|(c, _)| c)
}

fn summarize(defects: &[Defect], language: &str) -> String {
    match dominant_category(defects) {
        Some(category) => format!(
            "Found {} issue(s) in your {} code. The main problem is related to {}.",
            defects.len(),
            language,
            category.describe()
        ),
        None => format!(
            "Your {} code looks good! No major issues detected.",
            language
        ),
    }
}

/// Generic best-practice advice per language.
pub fn language_suggestions(lang: Option<Language>) -> &'static [&'static str] {
    match lang {
        Some(Language::JavaScript) => &[
            "Consider using async/await for better readability",
            "Add error handling with try-catch blocks",
        ],
        Some(Language::Python) => &[
            "Follow PEP 8 style guidelines",
            "Add type hints for better code documentation",
        ],
        Some(Language::Java) => &[
            "Use meaningful variable names",
            "Consider using proper exception handling",
        ],
        Some(Language::Cpp) => &[
            "Prefer RAII and smart pointers over manual memory management",
            "Pass large objects by const reference",
        ],
        Some(Language::C) => &[
            "Check the return value of every library call",
            "Bound every buffer write to avoid overflows",
        ],
        Some(Language::Html) => &[
            "Use semantic elements such as <main> and <section>",
            "Provide alt text for every image",
        ],
        Some(Language::Css) => &[
            "Group related declarations and keep selectors shallow",
            "Use custom properties for repeated values",
        ],
        None => &[],
    }
}
