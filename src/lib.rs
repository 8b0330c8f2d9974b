//! Snipcheck - rule-based snippet analyzer and template code generator.
//!
//! Snipcheck scans short code snippets for common surface defects using
//! per-language pattern rules, turns the defect count into a 0-100 quality
//! score with a human-readable summary, and produces starter code from a
//! small catalogue of templates.
//!
//! # Architecture
//!
//! - `language`: supported language identifiers and file extension mapping
//! - `detect`: rule catalogue, rule evaluation and defect explanations
//! - `score`: quality score and quality bands
//! - `analyzer`: detection, scoring and summary in one call
//! - `generate`: template catalogue and prompt-to-template selection
//! - `assistant`: the caller-facing contract with input validation
//! - `config`: YAML configuration (scoring, custom rules, exclusions)
//! - `report`: output formatting (pretty, JSON)
//!
//! Everything is synchronous and free of shared mutable state; catalogues
//! are built once and shared behind `Arc`.

pub mod analyzer;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod detect;
pub mod generate;
pub mod language;
pub mod report;
pub mod score;

pub use analyzer::{language_suggestions, AnalysisResult, Analyzer};
pub use assistant::{AssistError, CodeAssistant, LocalAssistant};
pub use config::Config;
pub use detect::{Defect, DefectCategory, Detector, Rule, RuleCatalogue, Severity};
pub use generate::{GenerationCatalogue, Generator};
pub use language::Language;
pub use score::{QualityBand, ScoringConfig};
