use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use datamend_client::{ClientConfig, HttpModificationService};
use datamend_core::file::FileKind;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "datamend")]
#[command(about = "Datamend - natural-language column modifications for tabular data files", long_about = None)]
struct Cli {
    /// Backend base URL (defaults to DATAMEND_API_URL, then localhost)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a CSV or Excel file
    Upload {
        /// Path of the file to upload
        path: PathBuf,
    },
    /// Show a sample of an uploaded file's rows
    Preview {
        /// Backend id of the uploaded file
        file_id: i64,
        /// Sample window size (the backend clamps it to 1..=100)
        #[arg(long)]
        rows: Option<u32>,
    },
    /// Upload a file, infer a modification, preview it, optionally apply it
    Process {
        /// Path of the file to upload
        path: PathBuf,
        /// Natural-language modification instruction
        instruction: String,
        /// Commit the proposal when its confidence allows it
        #[arg(long)]
        apply: bool,
    },
    /// Manage uploaded files
    Files {
        #[command(subcommand)]
        action: FilesAction,
    },
}

#[derive(Subcommand)]
enum FilesAction {
    /// List uploaded files
    List {
        /// Filter by declared type (csv or excel)
        #[arg(long)]
        file_type: Option<FileKind>,
    },
    /// Delete an uploaded file and its stored content
    Delete {
        /// Backend id of the file to delete
        file_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .without_time()
        .init();

    let cli = Cli::parse();
    let config = match cli.api_url {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    };
    let service = Arc::new(HttpModificationService::new(config));

    match cli.command {
        Commands::Upload { path } => commands::upload::run(service, &path).await,
        Commands::Preview { file_id, rows } => commands::preview::run(service, file_id, rows).await,
        Commands::Process {
            path,
            instruction,
            apply,
        } => commands::process::run(service, &path, &instruction, apply).await,
        Commands::Files { action } => match action {
            FilesAction::List { file_type } => commands::files::list(service, file_type).await,
            FilesAction::Delete { file_id } => commands::files::delete(service, file_id).await,
        },
    }
}
