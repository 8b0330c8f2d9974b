//! Detection of surface-level defects in source snippets.

mod explain;
mod rules;
mod runner;
mod types;

pub use explain::{consequence_for, suggestion_for};
pub use rules::{Matcher, Rule, RuleCatalogue, RuleLine};
pub use runner::Detector;
pub use types::{Defect, DefectCategory, Severity};
