//! unccda CLI - CCDA extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;

use unccda::{
    detect_format_from_path, parse_file_with_options, render, report, summarize, ClinicalDocument,
    DocumentStore, ExtractOptions, JsonFormat, ParseOptions, ValueRepeat,
};

#[derive(Parser)]
#[command(name = "unccda")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract CCDA sections, tables and demographics to text and JSON", long_about = None)]
struct Cli {
    /// Accept documents outside the CCDA namespaces
    #[arg(long, global = true)]
    lenient: bool,

    /// Empty sections at or above which a document is rejected
    #[arg(long, global = true, env = "UNCCDA_EMPTY_THRESHOLD", default_value_t = unccda::extract::EMPTY_SECTION_THRESHOLD)]
    threshold: usize,

    /// Fixed value repeat count for key/value output (random 2-5 if unset)
    #[arg(long, global = true, env = "UNCCDA_REPEAT")]
    repeat: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct JsonOutput {
    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List section titles
    Sections {
        /// Input CCDA file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        json: JsonOutput,
    },

    /// Validate a document the way an upload is validated
    Check {
        /// Input CCDA file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List sections whose table holds recorded data
    WithData {
        /// Input CCDA file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        json: JsonOutput,
    },

    /// Print one section as text
    Section {
        /// Input CCDA file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Section title (exact, case-sensitive)
        #[arg(value_name = "TITLE")]
        title: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Extract the tables of one section
    Tables {
        /// Input CCDA file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Section title (exact, case-sensitive)
        #[arg(value_name = "TITLE")]
        title: String,

        #[command(flatten)]
        json: JsonOutput,
    },

    /// Extract the fixed key/value report
    #[command(alias = "kv")]
    KeyValues {
        /// Input CCDA file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        json: JsonOutput,
    },

    /// Extract header-keyed records of every section
    Records {
        /// Input CCDA file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        json: JsonOutput,
    },

    /// Extract patient demographics
    Personal {
        /// Input CCDA file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        json: JsonOutput,
    },

    /// Show the digests handed to a summarizer for the medical sections
    Medical {
        /// Input CCDA file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        json: JsonOutput,
    },

    /// Show document information
    Info {
        /// Input CCDA file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

impl Cli {
    fn parse_options(&self) -> ParseOptions {
        if self.lenient {
            ParseOptions::new().lenient()
        } else {
            ParseOptions::new()
        }
    }

    fn extract_options(&self) -> ExtractOptions {
        let options = ExtractOptions::new().with_empty_section_threshold(self.threshold);
        match self.repeat {
            Some(count) => options.with_value_repeat(ValueRepeat::Fixed(count)),
            None => options,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let parse_options = cli.parse_options();
    let extract_options = cli.extract_options();

    let result = match cli.command {
        Some(Commands::Sections { input, json }) => cmd_sections(&input, parse_options, &json),
        Some(Commands::Check { input }) => cmd_check(&input, parse_options, extract_options),
        Some(Commands::WithData { input, json }) => cmd_with_data(&input, parse_options, &json),
        Some(Commands::Section {
            input,
            title,
            output,
        }) => cmd_section(&input, &title, parse_options, output.as_deref()),
        Some(Commands::Tables { input, title, json }) => {
            cmd_tables(&input, &title, parse_options, &json)
        }
        Some(Commands::KeyValues { input, json }) => {
            cmd_key_values(&input, parse_options, &extract_options, &json)
        }
        Some(Commands::Records { input, json }) => cmd_records(&input, parse_options, &json),
        Some(Commands::Personal { input, json }) => cmd_personal(&input, parse_options, &json),
        Some(Commands::Medical { input, json }) => cmd_medical(&input, parse_options, &json),
        Some(Commands::Info { input }) => cmd_info(&input, parse_options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: unccda <COMMAND> <FILE>".yellow());
            println!("       unccda --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn load(input: &Path, options: ParseOptions) -> unccda::Result<ClinicalDocument> {
    parse_file_with_options(input, options)
}

fn write_json<T: Serialize + ?Sized>(value: &T, json: &JsonOutput) -> CmdResult {
    let format = if json.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let text = render::to_json(value, format)?;
    write_output(&text, json.output.as_deref())
}

fn write_output(text: &str, output: Option<&Path>) -> CmdResult {
    if let Some(path) = output {
        fs::write(path, text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn cmd_sections(input: &Path, options: ParseOptions, json: &JsonOutput) -> CmdResult {
    let doc = load(input, options)?;
    write_json(&doc.section_titles(), json)
}

fn cmd_check(input: &Path, parse: ParseOptions, extract: ExtractOptions) -> CmdResult {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let data = fs::read(input)?;

    let store = DocumentStore::with_options(parse, extract);
    let active = store.ingest(&name, &data)?;

    let sections = active.document.sections();
    let empty = unccda::extract::empty_sections(&sections);
    println!("{} {}", "Accepted".green().bold(), active.name);
    println!(
        "{}: {} of {} (threshold {})",
        "Empty sections".bold(),
        empty.len(),
        sections.titles().len(),
        store.extract_options().empty_section_threshold
    );
    for title in empty {
        println!("  {} {}", "-".dimmed(), title);
    }

    Ok(())
}

fn cmd_with_data(input: &Path, options: ParseOptions, json: &JsonOutput) -> CmdResult {
    let doc = load(input, options)?;
    write_json(&report::SectionsWithData::from_document(&doc), json)
}

fn cmd_section(
    input: &Path,
    title: &str,
    options: ParseOptions,
    output: Option<&Path>,
) -> CmdResult {
    let doc = load(input, options)?;
    let sections = doc.sections();
    let text = render::section_to_text(sections.find(title)?);
    write_output(&text, output)
}

fn cmd_tables(input: &Path, title: &str, options: ParseOptions, json: &JsonOutput) -> CmdResult {
    let doc = load(input, options)?;
    let sections = doc.sections();
    let grids = unccda::extract::project_raw(sections.find(title)?);
    write_json(&grids, json)
}

fn cmd_key_values(
    input: &Path,
    options: ParseOptions,
    extract: &ExtractOptions,
    json: &JsonOutput,
) -> CmdResult {
    let doc = load(input, options)?;
    write_json(&report::key_value_report(&doc, extract), json)
}

fn cmd_records(input: &Path, options: ParseOptions, json: &JsonOutput) -> CmdResult {
    let doc = load(input, options)?;
    write_json(&report::record_report(&doc), json)
}

fn cmd_personal(input: &Path, options: ParseOptions, json: &JsonOutput) -> CmdResult {
    let doc = load(input, options)?;
    write_json(&report::PersonalDetails::from_document(&doc)?, json)
}

fn cmd_medical(input: &Path, options: ParseOptions, json: &JsonOutput) -> CmdResult {
    let doc = load(input, options)?;
    // No summarization service here: show exactly what one would receive.
    let passthrough = |digest: &str| -> unccda::Result<String> { Ok(digest.to_string()) };
    let digests = summarize::medical_data_report(&doc, &passthrough)?;
    write_json(&digests, json)
}

fn cmd_info(input: &Path, options: ParseOptions) -> CmdResult {
    let format = detect_format_from_path(input)?;
    let doc = load(input, options)?;
    let sections = doc.sections();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    if let Some(ref encoding) = format.encoding {
        println!("{}: {}", "Encoding".bold(), encoding);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let tables: usize = sections.all().iter().map(|s| s.tables().count()).sum();
    println!("{}: {}", "Sections".bold(), sections.len());
    println!("{}: {}", "Titled".bold(), sections.titles().len());
    println!("{}: {}", "Tables".bold(), tables);
    println!(
        "{}: {}",
        "Empty".bold(),
        unccda::extract::empty_sections(&sections).len()
    );
    println!(
        "{}: {}",
        "With data".bold(),
        unccda::extract::sections_with_data(&sections).len()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unccda".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("CCDA content extraction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unccda".dimmed());
    println!("License: MIT");
}
