//! Core types for detection results.

use serde::{Deserialize, Serialize};

/// Severity levels for defects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Defect categories recognised by the explanation resolver.
///
/// Categories are derived from a defect's message text, not from the rule
/// that produced it, so custom rules with familiar wording pick up the same
/// explanations as the built-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectCategory {
    MissingReturn,
    DebugPrint,
    VarUsage,
    UnclosedTag,
    MissingSemicolon,
    Other,
}

impl DefectCategory {
    /// Classify a defect message. The first matching category wins.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("return statement") {
            DefectCategory::MissingReturn
        } else if ["console.log", "print", "cout", "printf"]
            .iter()
            .any(|needle| lower.contains(needle))
        {
            DefectCategory::DebugPrint
        } else if lower.contains("var") {
            DefectCategory::VarUsage
        } else if lower.contains("unclosed") {
            DefectCategory::UnclosedTag
        } else if lower.contains("semicolon") {
            DefectCategory::MissingSemicolon
        } else {
            DefectCategory::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DefectCategory::MissingReturn => "missing_return",
            DefectCategory::DebugPrint => "debug_print",
            DefectCategory::VarUsage => "var_usage",
            DefectCategory::UnclosedTag => "unclosed_tag",
            DefectCategory::MissingSemicolon => "missing_semicolon",
            DefectCategory::Other => "other",
        }
    }

    /// Plural noun phrase used in analysis summaries.
    pub fn describe(&self) -> &'static str {
        match self {
            DefectCategory::MissingReturn => "missing return statements",
            DefectCategory::DebugPrint => "leftover debug print statements",
            DefectCategory::VarUsage => "function-scoped var declarations",
            DefectCategory::UnclosedTag => "unclosed tags",
            DefectCategory::MissingSemicolon => "missing semicolons",
            DefectCategory::Other => "general code structure",
        }
    }
}

impl std::fmt::Display for DefectCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single detected issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defect {
    /// Id of the rule that produced this defect.
    pub rule: String,
    /// Approximate line. Built-in rules report a fixed line per rule.
    pub line: usize,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
    pub consequence: String,
}

impl Defect {
    pub fn category(&self) -> DefectCategory {
        DefectCategory::classify(&self.message)
    }
}
