//! casequiz CLI: browse clinical cases and take their quizzes.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "casequiz",
    version,
    about = "Clinical case studies with graded quizzes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the case library
    List {
        /// Only show cases with this category tag
        #[arg(long)]
        category: Option<String>,

        /// Catalog file or directory (default: built-in cases)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show a case in full
    Show {
        /// Case id, e.g. "case-1"
        #[arg(long = "case")]
        case_id: String,

        /// Catalog file or directory (default: built-in cases)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Take the quiz attached to a case
    Quiz {
        /// Case id, e.g. "case-1"
        #[arg(long = "case")]
        case_id: String,

        /// Scripted answer as QUESTION_ID=ANSWER (repeatable); reads stdin when absent
        #[arg(long = "answer", value_name = "QUESTION_ID=ANSWER")]
        answers: Vec<String>,

        /// Write an attempt report as JSON
        #[arg(long)]
        save: bool,

        /// Output directory for attempt reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Catalog file or directory (default: built-in cases)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate catalog TOML files
    Validate {
        /// Path to catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Print a saved attempt report
    Review {
        /// Attempt report JSON
        #[arg(long)]
        report: PathBuf,
    },

    /// Create starter config and example catalog
    Init {
        /// Directory to scaffold into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("casequiz=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List {
            category,
            catalog,
            config,
        } => commands::list::execute(category, catalog, config),
        Commands::Show {
            case_id,
            catalog,
            config,
        } => commands::show::execute(case_id, catalog, config),
        Commands::Quiz {
            case_id,
            answers,
            save,
            output,
            catalog,
            config,
        } => commands::quiz::execute(case_id, answers, save, output, catalog, config),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Review { report } => commands::review::execute(report),
        Commands::Init { dir } => commands::init::execute(&dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
