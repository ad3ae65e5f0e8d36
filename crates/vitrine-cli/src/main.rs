//! Vitrine CLI - range notation, spreadsheet headers and the demo file server

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vitrine::prelude::*;
use vitrine::{column_index_to_excel_column_str, HeaderResponse};

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(
    author,
    version,
    about = "Range notation, spreadsheet header and demo server tool"
)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a cell range such as A1:C10 and show its bounds
    Range {
        /// Range in A1:C10 notation
        range: String,
    },

    /// Read the header row (or first rows) of an XLSX or CSV file
    Headers {
        /// Input spreadsheet file
        input: PathBuf,

        /// Zero-based row holding the headers (default: 0)
        #[arg(long, conflicts_with = "first_rows")]
        header_row: Option<usize>,

        /// Return the first N rows instead of a single header row
        #[arg(long)]
        first_rows: Option<usize>,

        /// Print the worker's JSON response
        #[arg(long)]
        json: bool,
    },

    /// Serve the inline pages and markdown routes
    Serve {
        /// JSON config file; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Address to listen on
        #[arg(short, long)]
        bind: Option<String>,

        /// Directory holding the inline pages
        #[arg(long)]
        root: Option<PathBuf>,

        /// Directory markdown files are served from
        #[arg(long)]
        markdown_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Range { range } => show_range(&range),
        Commands::Headers {
            input,
            header_row,
            first_rows,
            json,
        } => show_headers(&input, header_row, first_rows, json),
        Commands::Serve {
            config,
            bind,
            root,
            markdown_dir,
        } => {
            let config = serve_config(config.as_deref(), bind, root, markdown_dir)?;
            run_server(config)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Also installs the `log` bridge, so header worker records show up
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn show_range(text: &str) -> Result<()> {
    let status = vitrine::form::validate_range_input(text);
    let (bound, row) = match status {
        FieldStatus::Valid(bound, row) => (bound, row),
        FieldStatus::Invalid(message) => bail!("'{text}': {message}"),
        FieldStatus::Empty | FieldStatus::Pending => bail!("No range given"),
    };

    println!("Range: {}", text.trim());
    println!(
        "Columns: {}..{} (index {}..={}, {} wide)",
        column_index_to_excel_column_str(bound.left_bound_index),
        column_index_to_excel_column_str(bound.right_bound_index),
        bound.left_bound_index,
        bound.right_bound_index,
        bound.width()
    );
    println!("Starting row: {row}");
    Ok(())
}

fn show_headers(
    input: &Path,
    header_row: Option<usize>,
    first_rows: Option<usize>,
    json: bool,
) -> Result<()> {
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read '{}'", input.display()))?;

    let mut request = HeaderRequest::new(bytes);
    if let Some(row) = header_row {
        request = request.with_header_row(row);
    }
    if let Some(n) = first_rows {
        request = request.with_first_rows(n);
    }

    let response = HeaderWorker::spawn(request)
        .context("Failed to start header worker")?
        .blocking_response();

    if json {
        let text = serde_json::to_string_pretty(&response).context("Failed to encode response")?;
        println!("{text}");
        if matches!(response, HeaderResponse::Error { .. }) {
            std::process::exit(1);
        }
        return Ok(());
    }

    match response {
        HeaderResponse::Headers { headers } => print_headers(&headers),
        HeaderResponse::Error { error } => {
            bail!("Failed to read headers from '{}': {error}", input.display())
        }
    }
    Ok(())
}

fn print_headers(headers: &Headers) {
    match headers {
        Headers::Row(row) => {
            for (i, name) in row.iter().enumerate() {
                println!("{}\t{}", column_index_to_excel_column_str(i as u32), name);
            }
        }
        Headers::Rows(rows) => {
            for row in rows {
                println!("{}", row.join("\t"));
            }
        }
    }
}

fn serve_config(
    file: Option<&Path>,
    bind: Option<String>,
    root: Option<PathBuf>,
    markdown_dir: Option<PathBuf>,
) -> Result<ServeConfig> {
    let mut config = match file {
        Some(path) => ServeConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => ServeConfig::default(),
    };

    if let Some(bind) = bind {
        config.bind = bind;
    }
    if let Some(root) = root {
        config.inline_root = root;
    }
    if let Some(dir) = markdown_dir {
        config.markdown_dir = dir;
    }
    Ok(config)
}

#[tokio::main]
async fn run_server(config: ServeConfig) -> Result<()> {
    tracing::info!(
        inline_root = %config.inline_root.display(),
        markdown_dir = %config.markdown_dir.display(),
        pages = ?config.inline_pages,
        "starting server"
    );
    let server = Server::bind(config)
        .await
        .context("Failed to bind server")?;

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("failed to listen for ctrl-c: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await
        .context("Server failed")?;
    Ok(())
}
