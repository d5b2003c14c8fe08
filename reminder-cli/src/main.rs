use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

mod commands;
mod config;

#[derive(Parser, Debug)]
#[command(name = "release-reminder", author, version, about = "Find release dates in text and turn them into reminders", long_about = None)]
struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the most credible release date in a block of text
    #[command(group(ArgGroup::new("input").args(["text", "file"])))]
    Resolve {
        /// Text to scan (stdin when neither --text nor --file is given)
        #[arg(long)]
        text: Option<String>,

        /// File whose contents are scanned
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Reference "today" as YYYY-MM-DD (defaults to the current UTC date)
        #[arg(long)]
        reference_date: Option<String>,

        /// List every surviving candidate, not just the winner
        #[arg(long)]
        all: bool,

        #[arg(long)]
        json: bool,
    },

    /// Combine a page's description, title and comments into one result
    Page {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Repeat for each comment, in page order
        #[arg(long = "comment")]
        comments: Vec<String>,

        #[arg(long)]
        reference_date: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Build an all-day reminder event for a release
    Event {
        #[arg(long)]
        title: String,

        /// Release day as YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// Write an .ics file instead of printing the event JSON
        #[arg(long, value_name = "PATH")]
        ics: Option<PathBuf>,
    },

    /// Print a web search URL for a title's release date
    Search {
        #[arg(long)]
        title: String,

        #[arg(long)]
        year: Option<i32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_file_path.as_deref());

    let (config, config_path) =
        config::AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    tracing::debug!("Loaded config from {:?}", config_path);

    match cli.command {
        Command::Resolve {
            text,
            file,
            reference_date,
            all,
            json,
        } => {
            let input = commands::read_input(text, file.as_deref())?;
            let reference = commands::reference_date(reference_date.as_deref())?;
            commands::resolve(&input, reference, all, json)
        }
        Command::Page {
            title,
            description,
            comments,
            reference_date,
            json,
        } => {
            let reference = commands::reference_date(reference_date.as_deref())?;
            let page = shared_types::PageText {
                title,
                description,
                comments,
            };
            commands::page(&page, reference, &config, json)
        }
        Command::Event { title, date, ics } => {
            commands::event(&title, &date, ics.as_deref(), &config)
        }
        Command::Search { title, year } => commands::search(&title, year, &config),
    }
}

/// The returned guard flushes the log file when dropped
fn init_tracing(log_file_path: Option<&str>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("release-reminder.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
        None
    }
}
