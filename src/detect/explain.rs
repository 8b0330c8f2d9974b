//! Fix suggestions and consequence descriptions for defects.
//!
//! Both lookups classify the defect message into a [`DefectCategory`] and
//! return static prose. Suggestions may vary by language; consequences never
//! do.

use crate::language::Language;

use super::DefectCategory;

/// Suggested fix for a defect message.
pub fn suggestion_for(message: &str, language: Option<Language>) -> &'static str {
    match DefectCategory::classify(message) {
        DefectCategory::MissingReturn => match language {
            Some(Language::Python) => {
                "Add \"return a + b\" at the end of your function to return the calculated value."
            }
            Some(Language::JavaScript | Language::Java | Language::Cpp | Language::C) => {
                "Add \"return a + b;\" at the end of your function to return the calculated value."
            }
            _ => "Add a return statement to return the calculated value.",
        },
        DefectCategory::DebugPrint => {
            "Remove debug statements before production or use a proper logging library."
        }
        DefectCategory::VarUsage => {
            "Replace \"var\" with \"let\" for block-scoped variables or \"const\" for constants."
        }
        DefectCategory::UnclosedTag => {
            "Add the missing closing tag to properly structure your HTML."
        }
        DefectCategory::MissingSemicolon => {
            "Add a semicolon (;) at the end of the CSS property declaration."
        }
        DefectCategory::Other => "Review the code structure and fix the identified issue.",
    }
}

/// What happens if the defect is left in place.
pub fn consequence_for(message: &str) -> &'static str {
    match DefectCategory::classify(message) {
        DefectCategory::MissingReturn => {
            "The function will return undefined instead of the expected calculated value, causing unexpected behavior in your application."
        }
        DefectCategory::DebugPrint => {
            "Debug statements will clutter the output and may expose sensitive information in production."
        }
        DefectCategory::VarUsage => {
            "Using \"var\" can lead to scope-related bugs and unexpected variable hoisting behavior."
        }
        DefectCategory::UnclosedTag => {
            "Unclosed tags will break the HTML structure and may cause layout issues or invalid markup."
        }
        DefectCategory::MissingSemicolon => {
            "Missing semicolons can cause CSS properties to be ignored and styling to not work as expected."
        }
        DefectCategory::Other => {
            "This issue may cause runtime errors or unexpected behavior in your application."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_return_suggestion_varies_by_language() {
        let msg = "Function missing return statement";
        let py = suggestion_for(msg, Some(Language::Python));
        let js = suggestion_for(msg, Some(Language::JavaScript));
        let c = suggestion_for(msg, Some(Language::C));

        assert!(py.contains("return a + b\""));
        assert!(js.contains("return a + b;"));
        assert_eq!(js, c);
        assert_eq!(
            suggestion_for(msg, None),
            "Add a return statement to return the calculated value."
        );
    }

    #[test]
    fn test_consequence_is_language_agnostic() {
        let msg = "Console.log statement found";
        assert!(consequence_for(msg).contains("clutter the output"));
        assert_eq!(
            suggestion_for(msg, Some(Language::JavaScript)),
            suggestion_for(msg, None)
        );
    }

    #[test]
    fn test_unknown_category_falls_back() {
        assert_eq!(
            suggestion_for("Invalid text-shadow syntax", Some(Language::Css)),
            "Review the code structure and fix the identified issue."
        );
        assert!(consequence_for("something odd").contains("runtime errors"));
    }
}
