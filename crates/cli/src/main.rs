use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_app::books::{models::Book, service::BookService};
use shelf_kernel::settings::Settings;

/// Operator tooling for the shelf book service
#[derive(Debug, Parser)]
#[command(name = "shelf-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Path of the book collection document
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
    /// Print a summary of the stored collection
    Inspect {
        /// Path of the book collection document
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load shelf settings")?;
    shelf_telemetry::init(&settings.telemetry);

    match cli.command {
        Command::Serve {
            host,
            port,
            data_file,
        } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            if let Some(data_file) = data_file {
                settings.storage.data_file = data_file;
            }
            shelf_app::run(settings).await
        }
        Command::Inspect { data_file } => {
            let path = data_file.unwrap_or(settings.storage.data_file);
            inspect(path).await
        }
    }
}

async fn inspect(path: PathBuf) -> anyhow::Result<()> {
    tracing::debug!(path = %path.display(), "inspecting collection");
    let service = BookService::new(shelf_db::JsonFileStore::<Book>::new(&path));
    let books = service
        .list()
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    for book in &books {
        println!(
            "{}\t{}\t{}",
            book.id,
            book.name,
            book.publisher.as_deref().unwrap_or("-")
        );
    }
    println!("{} books in {}", books.len(), path.display());
    Ok(())
}
