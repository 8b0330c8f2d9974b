//! Supported source languages.
//!
//! Language identifiers arrive as free text (CLI flags, config keys, library
//! callers). They are matched case-insensitively against a closed set; an
//! unrecognized identifier yields `None` and callers fall back to empty rule
//! sets or placeholder templates instead of failing.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Python,
    Java,
    Cpp,
    C,
    Html,
    Css,
}

impl Language {
    /// Every supported language, in catalogue order.
    pub const ALL: [Language; 7] = [
        Language::JavaScript,
        Language::Python,
        Language::Java,
        Language::Cpp,
        Language::C,
        Language::Html,
        Language::Css,
    ];

    /// Canonical lower-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Html => "html",
            Language::Css => "css",
        }
    }

    /// Human-facing name.
    pub fn label(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::C => "C",
            Language::Html => "HTML",
            Language::Css => "CSS",
        }
    }

    /// Parse a language identifier, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "javascript" | "js" => Some(Language::JavaScript),
            "python" | "py" => Some(Language::Python),
            "java" => Some(Language::Java),
            "cpp" | "c++" => Some(Language::Cpp),
            "c" => Some(Language::C),
            "html" => Some(Language::Html),
            "css" => Some(Language::Css),
            _ => None,
        }
    }

    /// File extensions associated with this language.
    pub fn extensions(&self) -> &[&'static str] {
        match self {
            Language::JavaScript => &["js", "mjs", "cjs", "jsx"],
            Language::Python => &["py"],
            Language::Java => &["java"],
            Language::Cpp => &["cpp", "cc", "cxx", "hpp"],
            Language::C => &["c", "h"],
            Language::Html => &["html", "htm"],
            Language::Css => &["css"],
        }
    }

    /// Determine the language from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    /// Determine the language from a file path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Language::from_extension)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
