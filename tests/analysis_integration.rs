//! Integration tests for the analysis pipeline.
//!
//! These tests run the built-in catalogue against the sample snippets under
//! testdata/samples and check the defects, scores and summaries produced.

use std::path::PathBuf;
use std::sync::Arc;

use snipcheck::config::{self, Config};
use snipcheck::detect::{DefectCategory, Severity};
use snipcheck::{AnalysisResult, Analyzer, CodeAssistant, Language, LocalAssistant};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn read_sample(name: &str) -> String {
    std::fs::read_to_string(testdata_path().join("samples").join(name))
        .expect("should read sample")
}

fn analyze_sample(name: &str, language: &str) -> AnalysisResult {
    Analyzer::builtin().analyze(&read_sample(name), language)
}

fn rule_ids(result: &AnalysisResult) -> Vec<&str> {
    result.errors.iter().map(|d| d.rule.as_str()).collect()
}

#[test]
fn test_javascript_sample() {
    let result = analyze_sample("calculator.js", "javascript");

    assert!(result.has_errors);
    assert_eq!(rule_ids(&result), vec!["missing-return", "debug-print"]);
    assert_eq!(result.errors[0].line, 2);
    assert_eq!(result.errors[1].line, 6);
    assert_eq!(result.errors[1].message, "Console.log statement found");
    assert_eq!(result.code_quality, 60);
    assert_eq!(
        result.summary,
        "Found 2 issue(s) in your javascript code. The main problem is related to missing return statements."
    );
}

#[test]
fn test_python_sample() {
    let result = analyze_sample("calculator.py", "python");

    assert_eq!(rule_ids(&result), vec!["missing-return", "debug-print"]);
    assert_eq!(result.errors[1].line, 4);
    assert!(!result.errors[0].suggestion.contains(';'));
    assert_eq!(result.code_quality, 60);
    assert_eq!(result.suggestions.len(), 2);
}

#[test]
fn test_java_sample() {
    let result = analyze_sample("Calculator.java", "java");

    assert_eq!(rule_ids(&result), vec!["missing-return", "debug-print"]);
    assert_eq!(result.errors[0].message, "Method missing return statement");
    assert_eq!(result.errors[1].category(), DefectCategory::DebugPrint);
    assert_eq!(result.errors[1].line, 7);
}

#[test]
fn test_c_family_samples() {
    let cpp = analyze_sample("calculator.cpp", "cpp");
    assert_eq!(rule_ids(&cpp), vec!["missing-return", "debug-print"]);
    assert_eq!(cpp.errors[1].message, "cout statement found");

    let c = analyze_sample("calculator.c", "c");
    assert_eq!(rule_ids(&c), vec!["missing-return", "debug-print"]);
    assert_eq!(c.errors[1].message, "printf statement found");
    assert_eq!(c.errors[0].line, 5);
    assert_eq!(c.errors[1].line, 9);
}

#[test]
fn test_html_sample() {
    let result = analyze_sample("page.html", "html");

    assert_eq!(rule_ids(&result), vec!["unclosed-div", "unclosed-tag"]);
    assert_eq!(result.dominant_category(), Some(DefectCategory::UnclosedTag));
    assert!(result.summary.contains("unclosed tags"));
}

#[test]
fn test_css_sample() {
    let result = analyze_sample("style.css", "css");

    assert_eq!(rule_ids(&result), vec!["missing-semicolon", "text-shadow"]);
    assert_eq!(result.errors[0].line, 5);
    assert_eq!(result.errors[1].line, 8);
    assert_eq!(
        result.dominant_category(),
        Some(DefectCategory::MissingSemicolon)
    );
}

#[test]
fn test_clean_snippets_score_full_marks() {
    let clean = testdata_path().join("clean");

    let js = std::fs::read_to_string(clean.join("math.js")).unwrap();
    let result = Analyzer::builtin().analyze(&js, "javascript");
    assert!(!result.has_errors);
    assert_eq!(result.code_quality, 100);
    assert_eq!(
        result.summary,
        "Your javascript code looks good! No major issues detected."
    );
}

#[test]
fn test_css_semicolon_rule_is_coarse() {
    // Every declaration is terminated, yet any `name: value` text fires.
    let result = analyze_sample("theme.css", "css");
    assert_eq!(rule_ids(&result), vec!["missing-semicolon"]);
    assert_eq!(result.code_quality, 75);

    for code in ["a:hover {\n    color: red;\n}", "p{color:red;}"] {
        let result = Analyzer::builtin().analyze(code, "css");
        assert_eq!(rule_ids(&result), vec!["missing-semicolon"], "{}", code);
        assert_eq!(result.code_quality, 75);
    }

    assert_eq!(Analyzer::builtin().analyze("p {}\n", "css").code_quality, 100);
}

#[test]
fn test_language_identifier_aliases() {
    let code = read_sample("calculator.js");
    let canonical = Analyzer::builtin().analyze(&code, "javascript");
    let alias = Analyzer::builtin().analyze(&code, "JS");
    assert_eq!(canonical, alias);
}

#[test]
fn test_unknown_language_is_clean() {
    let result = Analyzer::builtin().analyze(&read_sample("calculator.js"), "Rust");
    assert!(!result.has_errors);
    assert_eq!(result.code_quality, 100);
    assert!(result.suggestions.is_empty());
    assert_eq!(
        result.summary,
        "Your Rust code looks good! No major issues detected."
    );
}

#[test]
fn test_every_defect_is_explained() {
    let samples = [
        ("calculator.js", Language::JavaScript),
        ("calculator.py", Language::Python),
        ("Calculator.java", Language::Java),
        ("calculator.cpp", Language::Cpp),
        ("calculator.c", Language::C),
        ("page.html", Language::Html),
        ("style.css", Language::Css),
    ];

    for (name, lang) in samples {
        let result = analyze_sample(name, lang.as_str());
        assert!(result.has_errors, "{} should have defects", name);
        for defect in &result.errors {
            assert!(defect.line >= 1);
            assert_eq!(defect.severity, Severity::Error);
            assert!(!defect.suggestion.is_empty(), "{}: {}", name, defect.rule);
            assert!(!defect.consequence.is_empty(), "{}: {}", name, defect.rule);
        }
    }
}

#[test]
fn test_config_custom_rules_and_scoring() {
    let config = Config::parse_file(testdata_path().join("snipcheck.yaml"))
        .expect("should parse config");
    config::validate(&config).expect("config should be valid");

    let analyzer = Analyzer::new(
        Arc::new(config.rule_catalogue().unwrap()),
        config.scoring,
    );

    let result = analyzer.analyze("const x = eval(input);\n", "javascript");
    assert_eq!(rule_ids(&result), vec!["eval-call"]);
    assert_eq!(result.errors[0].severity, Severity::Warning);
    assert_eq!(result.errors[0].line, 1);
    assert_eq!(result.code_quality, 70);

    let result = analyzer.analyze("x = 1\n\n# TODO: finish\n", "python");
    assert_eq!(rule_ids(&result), vec!["todo-marker"]);
    assert_eq!(result.errors[0].line, 1);
    assert_eq!(result.errors[0].category(), DefectCategory::Other);
}

#[test]
fn test_assistant_rejects_blank_code() {
    let assistant = LocalAssistant::builtin();
    assert!(assistant.analyze("\n\n", "python").is_err());
    assert_eq!(
        assistant.analyze(&read_sample("calculator.py"), "python").unwrap(),
        analyze_sample("calculator.py", "python")
    );
}
