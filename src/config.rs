//! Configuration file schema for snipcheck.
//!
//! A config tunes scoring, adds custom rules on top of the built-in
//! catalogue, and excludes paths from directory scans. Every field is
//! optional; an absent config behaves like the defaults.

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::detect::{Matcher, Rule, RuleCatalogue, RuleLine, Severity};
use crate::language::Language;
use crate::score::ScoringConfig;

/// Config file names searched for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["snipcheck.yaml", ".snipcheck.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Minimum acceptable quality per file (CLI exit status).
    #[serde(default)]
    pub min_quality: Option<u8>,
    /// Glob patterns for paths to skip during directory scans.
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Extra rules appended after the built-ins.
    #[serde(default)]
    pub rules: Vec<CustomRule>,
}

/// A user-defined regex rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CustomRule {
    pub id: String,
    pub language: String,
    pub pattern: String,
    pub message: String,
    #[serde(default = "default_severity")]
    pub severity: Severity,
    /// Declared line. When absent the line of the first match is reported.
    #[serde(default)]
    pub line: Option<usize>,
}

fn default_severity() -> Severity {
    Severity::Error
}

impl CustomRule {
    /// Compile into a catalogue rule for its language.
    pub fn compile(&self) -> anyhow::Result<(Language, Rule)> {
        let lang = Language::parse(&self.language).ok_or_else(|| {
            anyhow::anyhow!(
                "rule {:?}: unknown language {:?}",
                self.id,
                self.language
            )
        })?;
        let regex = Regex::new(&self.pattern)
            .map_err(|e| anyhow::anyhow!("rule {:?}: invalid pattern {:?}: {}", self.id, self.pattern, e))?;

        let line = match self.line {
            Some(0) => anyhow::bail!("rule {:?}: line must be positive", self.id),
            Some(n) => RuleLine::Fixed(n),
            None => RuleLine::FirstMatch,
        };

        Ok((
            lang,
            Rule {
                id: self.id.clone(),
                message: self.message.clone(),
                severity: self.severity,
                line,
                matcher: Matcher::Pattern(regex),
            },
        ))
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Find a config file: first in `dir`, then in the user config directory.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        let local = DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file());
        if local.is_some() {
            return local;
        }

        directories::ProjectDirs::from("", "", "snipcheck")
            .map(|dirs| dirs.config_dir().join(DEFAULT_CONFIG_NAMES[0]))
            .filter(|p| p.is_file())
    }

    /// Built-in rules followed by this config's custom rules.
    pub fn rule_catalogue(&self) -> anyhow::Result<RuleCatalogue> {
        let mut catalogue = RuleCatalogue::builtin();
        for custom in &self.rules {
            let (lang, rule) = custom.compile()?;
            catalogue.push(lang, rule);
        }
        Ok(catalogue)
    }

    /// Compile `excluded_paths` into a matcher.
    pub fn excluded_globs(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern).map_err(|e| {
                anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e)
            })?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    config.scoring.validate()?;

    if let Some(min) = config.min_quality {
        if min > 100 {
            anyhow::bail!("min_quality {} exceeds 100", min);
        }
    }

    for rule in &config.rules {
        if rule.id.trim().is_empty() {
            anyhow::bail!("custom rule with pattern {:?} has an empty id", rule.pattern);
        }
        rule.compile()?;
    }

    config.excluded_globs()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
version: "1"
scoring:
  baseline: 100
  penalty: 10
excluded_paths:
  - "**/dist/**"
rules:
  - id: eval-call
    language: JavaScript
    pattern: "eval\\("
    message: "Avoid eval"
    severity: warning
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.scoring.baseline, 100);
        assert_eq!(config.scoring.penalty, 10);
        assert_eq!(config.scoring.clean_score, 100);
        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.rules[0].severity, Severity::Warning);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.scoring, ScoringConfig::default());
        assert!(config.rules.is_empty());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_custom_rules_appended_to_builtins() {
        let config = Config {
            rules: vec![CustomRule {
                id: "bare-except".to_string(),
                language: "python".to_string(),
                pattern: r"except\s*:".to_string(),
                message: "Bare except clause".to_string(),
                severity: Severity::Info,
                line: None,
            }],
            ..Default::default()
        };
        let catalogue = config.rule_catalogue().unwrap();
        let rules = catalogue.rules_for(Language::Python);
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[2].id, "bare-except");
        assert_eq!(rules[2].line, RuleLine::FirstMatch);
    }

    #[test]
    fn test_validate_rejects_bad_rules() {
        let mut rule = CustomRule {
            id: "x".to_string(),
            language: "python".to_string(),
            pattern: "(unclosed".to_string(),
            message: "m".to_string(),
            severity: Severity::Error,
            line: None,
        };
        let config = Config {
            rules: vec![rule.clone()],
            ..Default::default()
        };
        assert!(validate(&config).is_err());

        rule.pattern = "ok".to_string();
        rule.language = "cobol".to_string();
        let config = Config {
            rules: vec![rule.clone()],
            ..Default::default()
        };
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("unknown language"));

        rule.language = "python".to_string();
        rule.line = Some(0);
        let config = Config {
            rules: vec![rule],
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_scoring_and_globs() {
        let config = Config {
            scoring: ScoringConfig {
                clean_score: 50,
                baseline: 90,
                penalty: 15,
            },
            ..Default::default()
        };
        assert!(validate(&config).is_err());

        let config = Config {
            excluded_paths: vec!["[".to_string()],
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excluded_globs_match() {
        let config = Config {
            excluded_paths: vec!["**/generated/**".to_string()],
            ..Default::default()
        };
        let globs = config.excluded_globs().unwrap();
        assert!(globs.is_match("src/generated/app.js"));
        assert!(!globs.is_match("src/app.js"));
    }

    #[test]
    fn test_discover_local_config() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            Config::discover(temp.path()).filter(|p| p.starts_with(temp.path())),
            None
        );

        let path = temp.path().join(".snipcheck.yaml");
        std::fs::write(&path, "min_quality: 60\n").unwrap();
        assert_eq!(Config::discover(temp.path()), Some(path.clone()));

        let config = Config::parse_file(&path).unwrap();
        assert_eq!(config.min_quality, Some(60));
    }
}
