//! Template-based code generation.
//!
//! A prompt is mapped to a template name by an ordered keyword scan, and the
//! template body for the requested language is returned verbatim.

mod catalogue;

pub use catalogue::{GenerationCatalogue, GenerationTemplate, LanguageTemplates, DEFAULT_TEMPLATE};

use std::sync::Arc;

use tracing::debug;

use crate::language::Language;

/// Keyword to template name, checked in order. First hit wins.
const TEMPLATE_KEYWORDS: &[(&str, &str)] = &[("factorial", "factorial"), ("todo", "todo")];

/// Pick a template name for a prompt.
pub fn select_template(prompt: &str) -> &'static str {
    let lower = prompt.to_lowercase();
    TEMPLATE_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, name)| *name)
        .unwrap_or(DEFAULT_TEMPLATE)
}

/// Placeholder for languages without templates.
pub fn placeholder(prompt: &str, language: &str) -> String {
    format!(
        "// Generated {} code for: {}\n\
         // This is a placeholder implementation\n\
         // In a real application, this would be generated by an AI model\n\
         \n\
         int main() {{\n    \
             // Your code implementation here\n    \
             return 0;\n\
         }}\n",
        language, prompt
    )
}

/// Generates code from an injected template catalogue.
#[derive(Debug, Clone)]
pub struct Generator {
    catalogue: Arc<GenerationCatalogue>,
}

impl Generator {
    pub fn new(catalogue: Arc<GenerationCatalogue>) -> Self {
        Self { catalogue }
    }

    /// A generator over the bundled templates.
    pub fn builtin() -> Self {
        Self::new(Arc::new(GenerationCatalogue::builtin()))
    }

    pub fn catalogue(&self) -> &GenerationCatalogue {
        &self.catalogue
    }

    /// Produce code for `prompt` in `language`. Never returns an empty string.
    pub fn generate(&self, prompt: &str, language: &str) -> String {
        let name = select_template(prompt);
        let templates = Language::parse(language).and_then(|l| self.catalogue.templates_for(l));

        match templates {
            Some(templates) => {
                let template = templates.get(name);
                debug!(language, requested = name, selected = %template.name, "template selected");
                template.body.clone()
            }
            None => {
                debug!(language, "no templates for language, using placeholder");
                placeholder(prompt, language.trim())
            }
        }
    }
}
