//! Output formatting for snipcheck results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::analyzer::AnalysisResult;
use crate::detect::{Defect, Severity};
use crate::score::QualityBand;

/// Analysis of one input (file or stdin).
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: String,
    /// Canonical language id, or the raw identifier if unrecognized.
    pub language: String,
    pub result: AnalysisResult,
}

impl FileReport {
    pub fn passes(&self, min_quality: u8) -> bool {
        self.result.code_quality >= min_quality
    }
}

// =============================================================================
// JSON Format
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub min_quality: u8,
    pub passed: bool,
    pub files_analyzed: usize,
    pub total_issues: usize,
    pub files: Vec<JsonFileReport>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonFileReport {
    pub path: String,
    pub language: String,
    pub quality_band: QualityBand,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Build the JSON report structure.
pub fn json_report(reports: &[FileReport], min_quality: u8) -> JsonReport {
    let files: Vec<JsonFileReport> = reports
        .iter()
        .map(|r| JsonFileReport {
            path: r.path.clone(),
            language: r.language.clone(),
            quality_band: r.result.quality_band(),
            result: r.result.clone(),
        })
        .collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        min_quality,
        passed: reports.iter().all(|r| r.passes(min_quality)),
        files_analyzed: reports.len(),
        total_issues: reports.iter().map(|r| r.result.errors.len()).sum(),
        files,
    }
}

/// Write results in JSON format.
pub fn write_json(reports: &[FileReport], min_quality: u8) -> anyhow::Result<()> {
    let report = json_report(reports, min_quality);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(reports: &[FileReport], min_quality: u8) {
    println!();
    print!("  ");
    print!("{}", "snipcheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    for report in reports {
        write_file_report(report);
        println!();
    }

    write_final_status(reports, min_quality);
    println!();
}

fn write_file_report(report: &FileReport) {
    let result = &report.result;

    print!("  {}", report.path.blue().bold());
    print!("  {}", format!("({})", report.language).dimmed());
    println!();

    print!("  ");
    if result.has_errors {
        print!("{}", format!("{} Issues Found", result.errors.len()).red());
    } else {
        print!("{}", "No Issues Found".green());
    }
    print!("  Quality: ");
    write_colored_quality(result.code_quality);
    println!("%");
    println!();

    println!("  {}", result.summary);
    println!();

    if !result.errors.is_empty() {
        write_defects(&result.errors);
    }

    if !result.suggestions.is_empty() {
        println!("  {}", "Suggestions:".bold());
        for s in &result.suggestions {
            println!("    - {}", s);
        }
    }
}

fn write_colored_quality(score: u8) {
    let text = score.to_string();
    match QualityBand::from_score(score) {
        QualityBand::Good => print!("{}", text.green().bold()),
        QualityBand::Fair => print!("{}", text.yellow()),
        QualityBand::Poor => print!("{}", text.red()),
    }
}

fn write_defects(defects: &[Defect]) {
    println!("  {} ({}):", "Issues".bold(), defects.len());
    println!();

    for d in defects {
        write_severity_tag(&d.severity);
        print!("   ");
        print!("{:<18}", d.rule.dimmed());
        print!("{}", format!("line {}", d.line).dimmed());
        println!();

        println!("            {}", d.message);
        println!("            {} {}", "fix:".green(), d.suggestion);
        println!("            {} {}", "why:".yellow(), d.consequence);
        println!();
    }
}

fn write_severity_tag(severity: &Severity) {
    match severity {
        Severity::Error => print!("    {} ", "ERROR".red()),
        Severity::Warning => print!("    {} ", "WARN ".yellow()),
        Severity::Info => print!("    {} ", "INFO ".blue()),
    }
}

fn write_final_status(reports: &[FileReport], min_quality: u8) {
    let failing = reports.iter().filter(|r| !r.passes(min_quality)).count();

    print!("  {}", format!("Minimum quality: {}", min_quality).dimmed());
    print!("  Files: {}", reports.len());
    print!("  ");

    if failing == 0 {
        print!("{}", "PASSED".green());
    } else {
        print!("{}", format!("FAILED ({} below minimum)", failing).red());
    }
    println!();
}
