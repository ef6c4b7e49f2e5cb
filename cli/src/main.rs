//! docrank CLI - persona-driven document section ranking

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docrank::{
    AnalysisOptions, ArchetypeTables, CollectionConfig, JsonFormat, Pipeline, ProfileBuilder,
    SourceRegistry, StructureExtractor,
};

/// Output file written into the collection directory by default.
const DEFAULT_OUTPUT: &str = "challenge1b_output.json";

/// Shown when persona and job produce no keyword.
const EMPTY_PROFILE_NOTICE: &str =
    "Persona and job yield no keywords; ranking uses layout signals only.";

#[derive(Parser)]
#[command(name = "docrank")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rank document sections against a persona and job to be done", long_about = None)]
struct Cli {
    /// Collection directory
    #[arg(value_name = "DIR")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a collection directory
    Run {
        /// Collection directory
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output file (defaults to challenge1b_output.json in the collection)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Number of sections to keep
        #[arg(short = 'k', long, env = "DOCRANK_TOP_K", default_value = "5")]
        top_k: usize,

        /// Maximum length of refined passages (0 = unlimited)
        #[arg(long, env = "DOCRANK_MAX_CHARS", default_value = "500")]
        max_chars: usize,

        /// Worker threads (0 = one per core)
        #[arg(short, long, env = "DOCRANK_WORKERS", default_value = "0")]
        workers: usize,

        /// Disable parallel processing
        #[arg(long)]
        sequential: bool,

        /// Custom persona/job archetype tables (JSON)
        #[arg(long, value_name = "FILE", env = "DOCRANK_TABLES")]
        tables: Option<PathBuf>,
    },

    /// Show the detected headings of an element dump
    Outline {
        /// Element dump file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON instead of an indented list
        #[arg(long)]
        json: bool,
    },

    /// Show the keyword profile of a persona and job
    Profile {
        /// Persona description
        #[arg(short, long)]
        persona: String,

        /// Job to be done
        #[arg(short, long)]
        job: String,

        /// Number of terms to show
        #[arg(short = 'n', long, default_value = "20")]
        top: usize,

        /// Output the full profile as JSON
        #[arg(long)]
        json: bool,

        /// Custom persona/job archetype tables (JSON)
        #[arg(long, value_name = "FILE", env = "DOCRANK_TABLES")]
        tables: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// JSON report
    Json,
    /// Readable ranked list
    Text,
}

struct RunArgs {
    output: Option<PathBuf>,
    stdout: bool,
    format: OutputFormat,
    compact: bool,
    top_k: usize,
    max_chars: usize,
    workers: usize,
    sequential: bool,
    tables: Option<PathBuf>,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            output: None,
            stdout: false,
            format: OutputFormat::Json,
            compact: false,
            top_k: docrank::relevance::DEFAULT_TOP_K,
            max_chars: docrank::subsection::DEFAULT_MAX_CHARS,
            workers: 0,
            sequential: false,
            tables: None,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run {
            input,
            output,
            stdout,
            format,
            compact,
            top_k,
            max_chars,
            workers,
            sequential,
            tables,
        }) => cmd_run(
            &input,
            RunArgs {
                output,
                stdout,
                format,
                compact,
                top_k,
                max_chars,
                workers,
                sequential,
                tables,
            },
        ),
        Some(Commands::Outline { input, json }) => cmd_outline(&input, json),
        Some(Commands::Profile {
            persona,
            job,
            top,
            json,
            tables,
        }) => cmd_profile(&persona, &job, top, json, tables.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: run if a collection is provided
            if let Some(input) = cli.input {
                cmd_run(&input, RunArgs::default())
            } else {
                println!("{}", "Usage: docrank <DIR>".yellow());
                println!("       docrank --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_tables(path: Option<&Path>) -> Result<ArchetypeTables, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            log::debug!("Loading archetype tables from {}", path.display());
            let json = fs::read_to_string(path)?;
            Ok(ArchetypeTables::from_json(&json)?)
        }
        None => Ok(ArchetypeTables::builtin()),
    }
}

fn cmd_run(input: &Path, args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    if args.stdout {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    pb.set_message("Reading collection...");
    let config = CollectionConfig::find(input)?;
    let documents = config.load_documents(input, &SourceRegistry::with_defaults());
    log::debug!(
        "Loaded {} documents from {} ({} without elements)",
        documents.len(),
        input.display(),
        documents.iter().filter(|d| d.elements.is_empty()).count()
    );
    pb.inc(1);

    pb.set_message(format!("Analyzing {} documents...", documents.len()));
    let mut options = AnalysisOptions::new()
        .with_top_k(args.top_k)
        .with_max_refined_chars(args.max_chars)
        .with_workers(args.workers);
    if args.sequential {
        options = options.sequential();
    }
    let pipeline = Pipeline::new(options).with_tables(load_tables(args.tables.as_deref())?);
    let report = pipeline.run(&documents, config.persona_text(), config.job_text())?;
    pb.inc(1);

    pb.set_message("Rendering...");
    let rendered = match args.format {
        OutputFormat::Json if args.compact => docrank::render::to_json(&report, JsonFormat::Compact)?,
        OutputFormat::Json => docrank::render::to_json(&report, JsonFormat::Pretty)?,
        OutputFormat::Text => docrank::render::to_text(&report),
    };
    pb.inc(1);

    if args.stdout {
        pb.finish_and_clear();
        println!("{}", rendered);
        return Ok(());
    }

    let path = args.output.unwrap_or_else(|| input.join(DEFAULT_OUTPUT));
    fs::write(&path, &rendered)?;
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} of {} documents",
        "Ranked".green().bold(),
        report.len(),
        documents.len()
    );
    for section in &report.extracted_sections {
        println!(
            "  {} {}. {} {}",
            "├─".dimmed(),
            section.importance_rank,
            section.section_title,
            format!("[{}, p.{}]", section.document, section.page_number).dimmed()
        );
    }
    println!("{} {}", "Saved to".green(), path.display());

    Ok(())
}

fn cmd_outline(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let document = SourceRegistry::with_defaults().load_document(input)?;
    let headings = StructureExtractor::new().outline(&document.id, &document.elements);

    if json {
        println!(
            "{}",
            docrank::render::to_json(&headings, JsonFormat::Pretty)?
        );
        return Ok(());
    }

    println!("{}", "Document Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Elements".bold(), document.elements.len());
    println!("{}: {}", "Headings".bold(), headings.len());
    println!();

    for heading in &headings {
        let indent = "  ".repeat(heading.level.depth());
        println!(
            "{}{} {} {}",
            indent,
            heading.level.label().dimmed(),
            heading.text,
            format!("(p.{}, score {:.2})", heading.page_number, heading.score).dimmed()
        );
    }

    Ok(())
}

fn cmd_profile(
    persona: &str,
    job: &str,
    top: usize,
    json: bool,
    tables: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let builder = ProfileBuilder::new().with_tables(load_tables(tables)?);
    let profile = builder.build(persona, job);

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("{}", "Keyword Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Persona".bold(), persona);
    println!("{}: {}", "Job".bold(), job);
    println!(
        "{}: {}",
        "Archetypes".bold(),
        builder
            .tables()
            .personas_for(persona)
            .chain(builder.tables().jobs_for(job))
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("{}: {}", "Terms".bold(), profile.len());

    if profile.is_empty() {
        println!("{}", EMPTY_PROFILE_NOTICE.yellow());
        return Ok(());
    }

    println!();
    for (term, weight) in profile.top_terms(top) {
        println!("  {:<24} {:.2}", term, weight);
    }

    if !profile.phrases.is_empty() {
        println!();
        println!("{}", "Phrases".cyan().bold());
        for phrase in &profile.phrases {
            println!("  {} {}", "├─".dimmed(), phrase);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docrank".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Persona-driven document section ranking");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_arguments() {
        let cli =
            Cli::try_parse_from(["docrank", "run", "input/c1", "-k", "3", "--stdout"]).unwrap();
        match cli.command {
            Some(Commands::Run {
                input,
                top_k,
                stdout,
                format,
                ..
            }) => {
                assert_eq!(input, PathBuf::from("input/c1"));
                assert_eq!(top_k, 3);
                assert!(stdout);
                assert!(format == OutputFormat::Json);
            }
            _ => panic!("expected run command"),
        }

        let cli = Cli::try_parse_from(["docrank", "input/c1"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.input, Some(PathBuf::from("input/c1")));
    }

    #[test]
    fn test_profile_requires_persona_and_job() {
        assert!(Cli::try_parse_from(["docrank", "profile", "-p", "Analyst"]).is_err());
        assert!(
            Cli::try_parse_from(["docrank", "profile", "-p", "Analyst", "-j", "Summarize"]).is_ok()
        );
    }

    #[test]
    fn test_empty_profile_notice() {
        let profile = ProfileBuilder::new()
            .with_tables(ArchetypeTables::empty())
            .build("", "");
        assert!(profile.is_empty());
        assert!(EMPTY_PROFILE_NOTICE.contains("layout signals only"));
        assert!(!EMPTY_PROFILE_NOTICE.contains("score zero"));
    }

    #[test]
    fn test_load_tables_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tables.json");
        fs::write(
            &path,
            r#"{"personas": [{"name": "chef", "terms": [{"term": "recipe"}]}]}"#,
        )
        .unwrap();

        let tables = load_tables(Some(&path)).unwrap();
        assert_eq!(tables.personas.len(), 1);
        assert!(tables.jobs.is_empty());
        assert_eq!(load_tables(None).unwrap(), ArchetypeTables::builtin());

        fs::write(&path, "{not json").unwrap();
        assert!(load_tables(Some(&path)).is_err());
        assert!(load_tables(Some(&dir.path().join("missing.json"))).is_err());
    }

    #[test]
    fn test_run_writes_report_into_collection() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("challenge1b_input.json"),
            r#"{"documents": ["guide.pdf", "gone.pdf"], "persona": "Travel Planner", "job_to_be_done": "Plan a cheap budget trip"}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("guide.json"),
            r#"[
                {"text": "Packing", "font_size": 16.0, "is_bold": true, "x": 72, "y": 92},
                {"text": "Bring layers for cold mornings on the coast.", "font_size": 11.0, "x": 72, "y": 108},
                {"text": "Budget", "font_size": 16.0, "is_bold": true, "x": 72, "y": 144},
                {"text": "Hostels near the harbour cost little in spring.", "font_size": 11.0, "x": 72, "y": 160}
            ]"#,
        )
        .unwrap();

        cmd_run(dir.path(), RunArgs::default()).unwrap();

        let written = fs::read_to_string(dir.path().join(DEFAULT_OUTPUT)).unwrap();
        let report: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(
            report["metadata"]["input_documents"],
            serde_json::json!(["guide.pdf", "gone.pdf"])
        );
        assert_eq!(report["extracted_sections"][0]["section_title"], "Budget");
    }
}
