//! cvlens CLI - inspect, search, and structure PDF resumes

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cvlens::{DocumentSession, LoadEvent, ResumeOverride};

#[derive(Parser)]
#[command(name = "cvlens")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Inspect, search, and structure PDF resumes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Extract full document text
    Text {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show the table of contents
    Toc {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Search the document text
    Search {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Search query
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Parse the document as a resume and emit JSON
    Resume {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// JSON override file merged over the parsed resume
        #[arg(long, value_name = "FILE")]
        overrides: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { input } => cmd_info(&input),
        Commands::Text { input, output } => cmd_text(&input, output.as_deref()),
        Commands::Toc { input } => cmd_toc(&input),
        Commands::Search { input, query } => cmd_search(&input, &query),
        Commands::Resume {
            input,
            overrides,
            compact,
        } => cmd_resume(&input, overrides.as_deref(), compact),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

/// Open a session with a progress bar driven by load events.
fn open_session(input: &std::path::Path) -> Result<DocumentSession, Box<dyn std::error::Error>> {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{bar:30}] {percent}%")
            .unwrap()
            .progress_chars("=> "),
    );
    bar.set_message("extracting");

    let session = DocumentSession::open_with_events(input, |event| match event {
        LoadEvent::PageExtracted { percent, .. } => bar.set_position(percent as u64),
        LoadEvent::IndexBuilt { .. } => bar.set_message("indexing"),
        LoadEvent::TocReady { .. } => bar.set_message("toc"),
        _ => {}
    })?;

    bar.finish_and_clear();
    Ok(session)
}

fn cmd_info(input: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(input)?;
    let info = session.info();

    println!("{}: {}", "Title".bold(), session.title());
    println!("{}: {}", "Pages".bold(), info.num_pages);
    println!("{}: {}", "Fingerprint".bold(), info.fingerprint);

    let metadata = &info.metadata;
    if let Some(author) = &metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(subject) = &metadata.subject {
        println!("{}: {}", "Subject".bold(), subject);
    }
    if let Some(creator) = &metadata.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(producer) = &metadata.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }
    if let Some(created) = &metadata.created {
        println!("{}: {}", "Created".bold(), created.to_rfc3339());
    }
    if let Some(modified) = &metadata.modified {
        println!("{}: {}", "Modified".bold(), modified.to_rfc3339());
    }

    Ok(())
}

fn cmd_text(
    input: &std::path::Path,
    output: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(input)?;

    match output {
        Some(path) => {
            fs::write(path, session.text())?;
            println!("{} {}", "wrote".green(), path.display());
        }
        None => println!("{}", session.text()),
    }

    Ok(())
}

fn cmd_toc(input: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(input)?;

    if session.toc().is_empty() {
        println!("{}", "no table of contents".yellow());
        return Ok(());
    }

    for entry in session.toc() {
        let indent = "  ".repeat((entry.level.saturating_sub(1)) as usize);
        println!(
            "{}{} {}",
            indent,
            format!("p{}", entry.page).cyan(),
            entry.title
        );
    }

    Ok(())
}

fn cmd_search(input: &std::path::Path, query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(input)?;
    let results = session.search(query);

    if results.is_empty() {
        println!("{}", "no matches".yellow());
        return Ok(());
    }

    for result in &results {
        println!(
            "{} {}",
            format!("p{}", result.page).cyan().bold(),
            result.context
        );
    }
    println!("{} match(es)", results.len());

    Ok(())
}

fn cmd_resume(
    input: &std::path::Path,
    overrides: Option<&std::path::Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(input)?;
    let mut resume = session.parse_resume();

    if let Some(path) = overrides {
        let data = fs::read_to_string(path)?;
        let record: ResumeOverride = serde_json::from_str(&data)?;
        resume = resume.merged(&record);
    }

    let json = if compact {
        serde_json::to_string(&resume)?
    } else {
        serde_json::to_string_pretty(&resume)?
    };
    println!("{}", json);

    Ok(())
}
