//! Per-language rule catalogue.
//!
//! Rules are coarse, whole-text pattern checks. They do not parse the source
//! and they carry the false positives that come with that: a JavaScript
//! function whose body ends in `return x;` still trips `missing-return`
//! because the pattern only looks at the last character before the closing
//! brace. Keep it that way; the catalogue documents surface-level smells,
//! not verified bugs.

use regex::Regex;
use std::collections::HashMap;

use super::Severity;
use crate::language::Language;

/// How a rule decides whether the source text contains its defect.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Matches if the regex occurs anywhere in the text.
    Pattern(Regex),
    /// Matches if some `open` occurrence has no `close` occurrence on the
    /// remainder of the same line.
    UnclosedTag { open: Regex, close: Regex },
}

impl Matcher {
    /// Byte offset of the first match, if any.
    pub fn first_match(&self, code: &str) -> Option<usize> {
        match self {
            Matcher::Pattern(regex) => regex.find(code).map(|m| m.start()),
            Matcher::UnclosedTag { open, close } => open.find_iter(code).find_map(|m| {
                let rest = &code[m.end()..];
                let line_rest = rest.split('\n').next().unwrap_or("");
                if close.is_match(line_rest) {
                    None
                } else {
                    Some(m.start())
                }
            }),
        }
    }

    pub fn is_match(&self, code: &str) -> bool {
        self.first_match(code).is_some()
    }
}

/// Where a rule reports its defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleLine {
    /// A declared line associated with the rule's typical occurrence.
    Fixed(usize),
    /// The 1-based line of the first match.
    FirstMatch,
}

/// A single detection rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub message: String,
    pub severity: Severity,
    pub line: RuleLine,
    pub matcher: Matcher,
}

impl Rule {
    /// Evaluate the rule against the whole source text.
    ///
    /// Returns the line to report, or `None` if the rule does not fire.
    /// Several occurrences still produce a single hit.
    pub fn evaluate(&self, code: &str) -> Option<usize> {
        let offset = self.matcher.first_match(code)?;
        Some(match self.line {
            RuleLine::Fixed(line) => line,
            RuleLine::FirstMatch => line_of_offset(code, offset),
        })
    }
}

fn line_of_offset(code: &str, offset: usize) -> usize {
    code[..offset].matches('\n').count() + 1
}

/// Immutable mapping from language to its ordered rules.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalogue {
    rules: HashMap<Language, Vec<Rule>>,
}

impl RuleCatalogue {
    /// An empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in rules for every supported language.
    pub fn builtin() -> Self {
        let mut catalogue = Self::new();

        for (lang, builtins) in BUILTIN_RULES {
            for builtin in *builtins {
                catalogue.push(*lang, builtin.build());
            }
        }

        catalogue
    }

    /// Append a rule after the existing rules for `lang`.
    pub fn push(&mut self, lang: Language, rule: Rule) {
        self.rules.entry(lang).or_default().push(rule);
    }

    /// Rules for a language, in evaluation order.
    pub fn rules_for(&self, lang: Language) -> &[Rule] {
        self.rules.get(&lang).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rules for a free-text language identifier. Unknown identifiers have no rules.
    pub fn lookup(&self, language: &str) -> &[Rule] {
        match Language::parse(language) {
            Some(lang) => self.rules_for(lang),
            None => &[],
        }
    }

    /// Total number of rules across all languages.
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Static description of a built-in rule.
struct BuiltinRule {
    id: &'static str,
    message: &'static str,
    line: usize,
    kind: BuiltinKind,
}

enum BuiltinKind {
    Pattern(&'static str),
    UnclosedTag {
        open: &'static str,
        close: &'static str,
    },
}

impl BuiltinRule {
    fn build(&self) -> Rule {
        let matcher = match self.kind {
            BuiltinKind::Pattern(p) => Matcher::Pattern(compile_builtin(p)),
            BuiltinKind::UnclosedTag { open, close } => Matcher::UnclosedTag {
                open: compile_builtin(open),
                close: compile_builtin(close),
            },
        };

        Rule {
            id: self.id.to_string(),
            message: self.message.to_string(),
            severity: Severity::Error,
            line: RuleLine::Fixed(self.line),
            matcher,
        }
    }
}

fn compile_builtin(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in rule pattern must compile")
}

const C_FAMILY_MISSING_RETURN: &str = r"\w+\s+\w+\([^)]*\)\s*\{[^}]*[^}return]";

static BUILTIN_RULES: &[(Language, &[BuiltinRule])] = &[
    (
        Language::JavaScript,
        &[
            BuiltinRule {
                id: "missing-return",
                message: "Function missing return statement",
                line: 2,
                kind: BuiltinKind::Pattern(r"function\s+\w+\([^)]*\)\s*\{[^}]*[^}return]"),
            },
            BuiltinRule {
                id: "debug-print",
                message: "Console.log statement found",
                line: 6,
                kind: BuiltinKind::Pattern(r"console\.log\s*\("),
            },
            BuiltinRule {
                id: "var-usage",
                message: "Use let or const instead of var",
                line: 5,
                kind: BuiltinKind::Pattern(r"var\s+"),
            },
        ],
    ),
    (
        Language::Python,
        &[
            BuiltinRule {
                id: "missing-return",
                message: "Function missing return statement",
                line: 2,
                kind: BuiltinKind::Pattern(r"(?m)def\s+\w+\([^)]*\):[^return]*$"),
            },
            BuiltinRule {
                id: "debug-print",
                message: "Print statement found",
                line: 4,
                kind: BuiltinKind::Pattern(r"print\s*\("),
            },
        ],
    ),
    (
        Language::Java,
        &[
            BuiltinRule {
                id: "missing-return",
                message: "Method missing return statement",
                line: 2,
                kind: BuiltinKind::Pattern(
                    r"public\s+static\s+\w+\s+\w+\([^)]*\)\s*\{[^}]*[^}return]",
                ),
            },
            BuiltinRule {
                id: "debug-print",
                message: "System.out.print statement found",
                line: 7,
                kind: BuiltinKind::Pattern(r"System\.out\.print"),
            },
        ],
    ),
    (
        Language::Cpp,
        &[
            BuiltinRule {
                id: "missing-return",
                message: "Function missing return statement",
                line: 5,
                kind: BuiltinKind::Pattern(C_FAMILY_MISSING_RETURN),
            },
            BuiltinRule {
                id: "debug-print",
                message: "cout statement found",
                line: 9,
                kind: BuiltinKind::Pattern(r"cout\s*<<"),
            },
        ],
    ),
    (
        Language::C,
        &[
            BuiltinRule {
                id: "missing-return",
                message: "Function missing return statement",
                line: 5,
                kind: BuiltinKind::Pattern(C_FAMILY_MISSING_RETURN),
            },
            BuiltinRule {
                id: "debug-print",
                message: "printf statement found",
                line: 9,
                kind: BuiltinKind::Pattern(r"printf\s*\("),
            },
        ],
    ),
    (
        Language::Html,
        &[
            BuiltinRule {
                id: "unclosed-div",
                message: "Unclosed div tag",
                line: 8,
                kind: BuiltinKind::UnclosedTag {
                    open: r"<div[^>]*>",
                    close: r"</div>",
                },
            },
            BuiltinRule {
                id: "unclosed-tag",
                message: "Unclosed HTML tag",
                line: 9,
                kind: BuiltinKind::UnclosedTag {
                    open: r"<\w+[^>]*>",
                    close: r"</\w+>",
                },
            },
        ],
    ),
    (
        Language::Css,
        &[
            BuiltinRule {
                id: "missing-semicolon",
                message: "Missing semicolon in CSS property",
                line: 5,
                // Any `name: value` text fires, terminated or not.
                kind: BuiltinKind::Pattern(r"[^;{}]+:[^;{}]+"),
            },
            BuiltinRule {
                id: "text-shadow",
                message: "Invalid text-shadow syntax",
                line: 8,
                kind: BuiltinKind::Pattern(r"text-shadow\s*:\s*[^;]*[^;]"),
            },
        ],
    ),
];
