//! Detection runner that applies a rule catalogue to source text.

use std::sync::Arc;

use tracing::debug;

use super::{consequence_for, suggestion_for, Defect, RuleCatalogue};
use crate::language::Language;

/// Runs every catalogue rule for a language against a snippet.
#[derive(Debug, Clone)]
pub struct Detector {
    catalogue: Arc<RuleCatalogue>,
}

impl Detector {
    /// Create a detector over a shared catalogue.
    pub fn new(catalogue: Arc<RuleCatalogue>) -> Self {
        Self { catalogue }
    }

    /// Detect defects in `code`.
    ///
    /// Rules run in catalogue order and do not short-circuit; each rule
    /// contributes at most one defect. Unknown languages yield no defects.
    pub fn detect(&self, code: &str, language: &str) -> Vec<Defect> {
        let lang = Language::parse(language);
        let rules = match lang {
            Some(lang) => self.catalogue.rules_for(lang),
            None => {
                debug!(language, "no rules for unrecognized language");
                return Vec::new();
            }
        };

        let mut defects = Vec::new();
        for rule in rules {
            let Some(line) = rule.evaluate(code) else {
                continue;
            };

            debug!(rule = %rule.id, line, "rule matched");
            defects.push(Defect {
                rule: rule.id.clone(),
                line,
                severity: rule.severity,
                message: rule.message.clone(),
                suggestion: suggestion_for(&rule.message, lang).to_string(),
                consequence: consequence_for(&rule.message).to_string(),
            });
        }

        defects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{Matcher, Rule, RuleLine, Severity};
    use regex::Regex;

    fn detector() -> Detector {
        Detector::new(Arc::new(RuleCatalogue::builtin()))
    }

    #[test]
    fn test_detect_single_missing_return() {
        let defects = detector().detect("function calculateSum(a,b){a+b;}", "javascript");
        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].rule, "missing-return");
        assert_eq!(defects[0].line, 2);
        assert_eq!(defects[0].severity, Severity::Error);
        assert!(defects[0]
            .message
            .to_lowercase()
            .contains("missing return statement"));
        assert!(defects[0].suggestion.contains("return a + b;"));
    }

    #[test]
    fn test_detect_all_rules_evaluated_in_order() {
        let code = "var total = 0;\nfunction add(a, b) {\n  a + b;\n}\nconsole.log(add(1, 2));\n";
        let defects = detector().detect(code, "javascript");
        let ids: Vec<_> = defects.iter().map(|d| d.rule.as_str()).collect();
        assert_eq!(ids, vec!["missing-return", "debug-print", "var-usage"]);
    }

    #[test]
    fn test_repeated_occurrences_yield_one_defect() {
        let code = "console.log(1);\nconsole.log(2);\nconsole.log(3);\n";
        let defects = detector().detect(code, "javascript");
        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].rule, "debug-print");
    }

    #[test]
    fn test_language_lookup_is_case_insensitive() {
        let defects = detector().detect("print(\"hi\")", "Python");
        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].message, "Print statement found");
    }

    #[test]
    fn test_unknown_language_has_no_defects() {
        assert!(detector().detect("console.log(1)", "klingon").is_empty());
    }

    #[test]
    fn test_detect_is_deterministic() {
        let d = detector();
        let code = "#include <stdio.h>\nint main() {\n  printf(\"x\");\n}\n";
        assert_eq!(d.detect(code, "c"), d.detect(code, "c"));
    }

    #[test]
    fn test_custom_rule_severity_and_line() {
        let mut catalogue = RuleCatalogue::builtin();
        catalogue.push(
            Language::Python,
            Rule {
                id: "bare-except".to_string(),
                message: "Bare except clause".to_string(),
                severity: Severity::Warning,
                line: RuleLine::FirstMatch,
                matcher: Matcher::Pattern(Regex::new(r"except\s*:").unwrap()),
            },
        );
        let d = Detector::new(Arc::new(catalogue));
        let defects = d.detect("try:\n    x = 1\nexcept:\n    pass\n", "python");
        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].severity, Severity::Warning);
        assert_eq!(defects[0].line, 3);
        assert_eq!(
            defects[0].suggestion,
            "Review the code structure and fix the identified issue."
        );
    }
}
