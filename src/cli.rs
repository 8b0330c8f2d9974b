//! Command-line interface for snipcheck.

use clap::{Parser, Subcommand};
use globset::GlobSet;
use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use anyhow::Context;

use crate::assistant::{AssistError, CodeAssistant, LocalAssistant};
use crate::config::{self, Config};
use crate::detect::{RuleCatalogue, RuleLine};
use crate::generate::GenerationCatalogue;
use crate::language::Language;
use crate::report::{self, FileReport};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "SNIPCHECK_LOG";

/// Directories never descended into during scans.
const SKIPPED_DIRS: &[&str] = &["node_modules", "vendor", "target", "dist", "build"];

/// Rule-based snippet analyzer and template code generator.
///
/// Detects surface-level defects (missing returns, leftover debug prints,
/// unclosed tags, missing semicolons) with coarse pattern rules, scores each
/// snippet from 0 to 100, and generates starter code from canned templates.
#[derive(Parser)]
#[command(name = "snipcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze files, directories, or stdin
    #[command(visible_alias = "check")]
    Analyze(AnalyzeArgs),
    /// Generate code from a prompt
    Generate(GenerateArgs),
    /// List the detection rules
    Rules(RulesArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Files or directories to analyze ("-" reads stdin)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Language of the input (default: inferred from file extension)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Minimum acceptable quality per file (exit non-zero if any is lower)
    #[arg(short, long)]
    pub min_quality: Option<u8>,
}

/// Arguments for the generate command.
#[derive(Parser)]
pub struct GenerateArgs {
    /// What the code should do
    pub prompt: String,

    /// Target language
    #[arg(short, long)]
    pub language: String,

    /// Write the code to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the rules command.
#[derive(Parser)]
pub struct RulesArgs {
    /// Only list rules for this language
    #[arg(short, long)]
    pub language: Option<String>,

    /// Include custom rules from this config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Initialize the `tracing` subscriber. Logs go to stderr.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load the explicit config, one discovered from `dir`, or defaults.
fn load_config(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => Config::discover(dir),
    };

    let config = match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            Config::parse_file(&path)?
        }
        None => Config::default(),
    };

    config::validate(&config).context("invalid config")?;
    Ok(config)
}

/// One unit of analysis input.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Input {
    path: PathBuf,
    language: String,
}

const STDIN_PATH: &str = "-";

/// Expand paths into analysis inputs.
///
/// Directories contribute files with a recognized extension. Explicit files
/// are always analyzed; an unrecognized extension becomes the language id
/// and simply has no rules. Stdin is read at most once.
fn collect_inputs(
    paths: &[PathBuf],
    language: Option<&str>,
    excluded: &GlobSet,
) -> anyhow::Result<Vec<Input>> {
    let mut inputs = Vec::new();
    let mut stdin_seen = false;

    for path in paths {
        if path.as_os_str() == STDIN_PATH {
            if stdin_seen {
                continue;
            }
            stdin_seen = true;
            let language = language
                .ok_or_else(|| anyhow::anyhow!("--language is required when reading stdin"))?;
            inputs.push(Input {
                path: path.clone(),
                language: language.to_string(),
            });
            continue;
        }

        let metadata = std::fs::metadata(path)
            .with_context(|| format!("cannot access path {}", path.display()))?;

        if metadata.is_file() {
            let language = language.map(str::to_string).unwrap_or_else(|| {
                match Language::from_path(path) {
                    Some(lang) => lang.as_str().to_string(),
                    None => path
                        .extension()
                        .and_then(|e| e.to_str())
                        .unwrap_or("text")
                        .to_string(),
                }
            });
            inputs.push(Input {
                path: path.clone(),
                language,
            });
            continue;
        }

        for entry in WalkDir::new(path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }
                let name = e.file_name().to_string_lossy();
                !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref())
            })
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file = entry.path();
            if excluded.is_match(file) {
                continue;
            }
            if let Some(lang) = Language::from_path(file) {
                inputs.push(Input {
                    path: file.to_path_buf(),
                    language: language
                        .map(str::to_string)
                        .unwrap_or_else(|| lang.as_str().to_string()),
                });
            }
        }
    }

    Ok(inputs)
}

fn read_input(input: &Input) -> anyhow::Result<String> {
    if input.path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(&input.path)
        .with_context(|| format!("reading {}", input.path.display()))
}

/// Canonical language id when recognized, otherwise the raw identifier.
fn display_language(language: &str) -> String {
    Language::parse(language)
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| language.to_string())
}

/// Analyze every input in parallel. Output order follows input order.
fn analyze_inputs(
    assistant: &LocalAssistant,
    inputs: &[Input],
) -> anyhow::Result<Vec<FileReport>> {
    let outcomes: Vec<anyhow::Result<Option<FileReport>>> = inputs
        .par_iter()
        .map(|input| {
            let code = read_input(input)?;
            let path = input.path.to_string_lossy().to_string();
            match assistant.analyze(&code, &input.language) {
                Ok(result) => {
                    info!(path = %path, issues = result.errors.len(), quality = result.code_quality, "analyzed");
                    Ok(Some(FileReport {
                        path,
                        language: display_language(&input.language),
                        result,
                    }))
                }
                Err(e @ AssistError::InvalidInput { .. }) => {
                    if input.path.as_os_str() == STDIN_PATH {
                        Err(e.into())
                    } else {
                        warn!(path = %path, "skipping empty file");
                        Ok(None)
                    }
                }
            }
        })
        .collect();

    let mut reports = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        if let Some(report) = outcome? {
            reports.push(report);
        }
    }
    Ok(reports)
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let config = load_config(args.config.as_deref(), &std::env::current_dir()?)?;
    let min_quality = args.min_quality.or(config.min_quality).unwrap_or(0);
    if min_quality > 100 {
        eprintln!("Error: --min-quality must be between 0 and 100");
        return Ok(EXIT_ERROR);
    }

    let assistant = LocalAssistant::from_catalogues(
        Arc::new(config.rule_catalogue()?),
        Arc::new(GenerationCatalogue::builtin()),
        config.scoring,
    );

    let excluded = config.excluded_globs()?;
    let inputs = collect_inputs(&args.paths, args.language.as_deref(), &excluded)?;
    if inputs.is_empty() {
        eprintln!("Warning: no files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    let reports = analyze_inputs(&assistant, &inputs)?;

    match args.format.as_str() {
        "json" => report::write_json(&reports, min_quality)?,
        _ => report::write_pretty(&reports, min_quality),
    }

    if reports.iter().all(|r| r.passes(min_quality)) {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the generate command.
pub fn run_generate(args: &GenerateArgs) -> anyhow::Result<i32> {
    let assistant = LocalAssistant::builtin();
    let code = match assistant.generate(&args.prompt, &args.language) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let Some(output) = &args.output else {
        print!("{}", code);
        return Ok(EXIT_SUCCESS);
    };

    if output.exists() {
        eprintln!("Error: file already exists: {}", output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
    }

    std::fs::write(output, &code).with_context(|| format!("writing {}", output.display()))?;
    println!("Wrote {} ({} lines)", output.display(), code.lines().count());

    Ok(EXIT_SUCCESS)
}

/// Rules `analyze` would apply: built-ins plus custom rules from the config.
fn active_rules(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<RuleCatalogue> {
    load_config(explicit, dir)?.rule_catalogue()
}

/// Run the rules command.
pub fn run_rules(args: &RulesArgs) -> anyhow::Result<i32> {
    let catalogue = active_rules(args.config.as_deref(), &std::env::current_dir()?)?;

    let languages: Vec<Language> = match &args.language {
        Some(name) => match Language::parse(name) {
            Some(lang) => vec![lang],
            None => {
                println!("No rules for {:?}.", name);
                return Ok(EXIT_SUCCESS);
            }
        },
        None => Language::ALL.to_vec(),
    };

    for lang in languages {
        println!("{} ({}):", lang.label(), lang.as_str());
        for rule in catalogue.rules_for(lang) {
            let line = match rule.line {
                RuleLine::Fixed(n) => format!("line {}", n),
                RuleLine::FirstMatch => "first match".to_string(),
            };
            println!(
                "  {:<20} {:<8} {:<12} {}",
                rule.id,
                rule.severity.to_string(),
                line,
                rule.message
            );
        }
        println!();
    }

    Ok(EXIT_SUCCESS)
}
