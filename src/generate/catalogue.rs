//! Per-language code template catalogue.

use std::collections::{BTreeMap, HashMap};

use crate::language::Language;

/// Name of the fallback template every language carries.
pub const DEFAULT_TEMPLATE: &str = "default";

/// A named, literal code snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTemplate {
    pub name: String,
    pub body: String,
}

impl GenerationTemplate {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// Templates for one language. The default template is mandatory.
#[derive(Debug, Clone)]
pub struct LanguageTemplates {
    default: GenerationTemplate,
    named: BTreeMap<String, GenerationTemplate>,
}

impl LanguageTemplates {
    pub fn new(default_body: impl Into<String>) -> Self {
        Self {
            default: GenerationTemplate::new(DEFAULT_TEMPLATE, default_body),
            named: BTreeMap::new(),
        }
    }

    /// Add a named template. Registering "default" replaces the default.
    pub fn with(mut self, name: &str, body: impl Into<String>) -> Self {
        if name == DEFAULT_TEMPLATE {
            self.default = GenerationTemplate::new(DEFAULT_TEMPLATE, body);
        } else {
            self.named
                .insert(name.to_string(), GenerationTemplate::new(name, body));
        }
        self
    }

    /// Look up a template by name, falling back to the default.
    pub fn get(&self, name: &str) -> &GenerationTemplate {
        self.named.get(name).unwrap_or(&self.default)
    }

    pub fn default_template(&self) -> &GenerationTemplate {
        &self.default
    }

    /// Template names, default first.
    pub fn names(&self) -> Vec<&str> {
        std::iter::once(DEFAULT_TEMPLATE)
            .chain(self.named.keys().map(String::as_str))
            .collect()
    }
}

/// Immutable mapping from language to its templates.
#[derive(Debug, Clone, Default)]
pub struct GenerationCatalogue {
    languages: HashMap<Language, LanguageTemplates>,
}

impl GenerationCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled templates. HTML and CSS have none.
    pub fn builtin() -> Self {
        let mut catalogue = Self::new();

        catalogue.insert(
            Language::JavaScript,
            LanguageTemplates::new(include_str!("../templates/javascript/default.js"))
                .with("factorial", include_str!("../templates/javascript/factorial.js"))
                .with("todo", include_str!("../templates/javascript/todo.js")),
        );
        catalogue.insert(
            Language::Python,
            LanguageTemplates::new(include_str!("../templates/python/default.py"))
                .with("factorial", include_str!("../templates/python/factorial.py"))
                .with("todo", include_str!("../templates/python/todo.py")),
        );
        catalogue.insert(
            Language::Java,
            LanguageTemplates::new(include_str!("../templates/java/default.java"))
                .with("factorial", include_str!("../templates/java/factorial.java"))
                .with("todo", include_str!("../templates/java/todo.java")),
        );
        catalogue.insert(
            Language::Cpp,
            LanguageTemplates::new(include_str!("../templates/cpp/default.cpp"))
                .with("factorial", include_str!("../templates/cpp/factorial.cpp"))
                .with("todo", include_str!("../templates/cpp/todo.cpp")),
        );
        catalogue.insert(
            Language::C,
            LanguageTemplates::new(include_str!("../templates/c/default.c"))
                .with("factorial", include_str!("../templates/c/factorial.c"))
                .with("todo", include_str!("../templates/c/todo.c")),
        );

        catalogue
    }

    pub fn insert(&mut self, lang: Language, templates: LanguageTemplates) {
        self.languages.insert(lang, templates);
    }

    pub fn templates_for(&self, lang: Language) -> Option<&LanguageTemplates> {
        self.languages.get(&lang)
    }

    /// Languages with templates, in canonical order.
    pub fn languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|l| self.languages.contains_key(l))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_languages() {
        let catalogue = GenerationCatalogue::builtin();
        assert_eq!(
            catalogue.languages(),
            vec![
                Language::JavaScript,
                Language::Python,
                Language::Java,
                Language::Cpp,
                Language::C
            ]
        );
        assert!(catalogue.templates_for(Language::Html).is_none());
    }

    #[test]
    fn test_every_language_has_non_empty_default() {
        let catalogue = GenerationCatalogue::builtin();
        for lang in catalogue.languages() {
            let templates = catalogue.templates_for(lang).unwrap();
            assert_eq!(templates.default_template().name, DEFAULT_TEMPLATE);
            assert!(!templates.default_template().body.trim().is_empty());
            assert_eq!(templates.names(), vec!["default", "factorial", "todo"]);
        }
    }

    #[test]
    fn test_missing_name_falls_back_to_default() {
        let templates = LanguageTemplates::new("fallback").with("hello", "hi");
        assert_eq!(templates.get("hello").body, "hi");
        assert_eq!(templates.get("nope").body, "fallback");
        assert_eq!(templates.get("nope").name, "default");
    }

    #[test]
    fn test_with_default_replaces_default() {
        let templates = LanguageTemplates::new("old").with("default", "new");
        assert_eq!(templates.default_template().body, "new");
        assert_eq!(templates.names(), vec!["default"]);
    }
}
