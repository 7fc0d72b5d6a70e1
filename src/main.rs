//! CLI entry point for the production loading dashboard.
//!
//! Provides subcommands for serving the tabbed dashboard, logging the
//! computed summaries, and exporting them to files.

use anyhow::{Context, Result};
use carregamento::config::{self, ServeConfig};
use carregamento::context::ReportContext;
use carregamento::output::{export_all, print_json, print_pretty};
use carregamento::server::{AppState, serve};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "carregamento")]
#[command(about = "Production loading analytics dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the measurement file and serve the dashboard over HTTP
    Serve {
        /// Semicolon-delimited measurement file (env CARREGAMENTO_INPUT)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Address to listen on (env CARREGAMENTO_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (env CARREGAMENTO_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Page title (env CARREGAMENTO_TITLE)
        #[arg(long)]
        title: Option<String>,
    },
    /// Load the measurement file and log the seven summary tables
    Summary {
        /// Semicolon-delimited measurement file (env CARREGAMENTO_INPUT)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Log the summaries as JSON instead of one line per group
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write every summary table to CSV plus a combined JSON file
    Export {
        /// Semicolon-delimited measurement file (env CARREGAMENTO_INPUT)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Directory to write the summaries into
        #[arg(short, long, default_value = "summaries")]
        output_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = config::log_file_path();
    let log_dir = log_file_path.parent().unwrap_or(Path::new("logs"));
    let log_file_name = log_file_path
        .file_name()
        .unwrap_or(OsStr::new("carregamento.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            input,
            host,
            port,
            title,
        } => {
            let config = ServeConfig::resolve(input, host, port, title)?;
            let context = load_context(&config.input)?;
            let state = AppState::new(context, &config.title);

            serve(&config.host, config.port, state).await?;
        }
        Commands::Summary { input, json } => {
            let context = load_context(&config::resolve_input(input))?;
            if json {
                print_json(&context)?;
            } else {
                print_pretty(&context);
            }
        }
        Commands::Export { input, output_dir } => {
            let context = load_context(&config::resolve_input(input))?;
            let written = export_all(&output_dir, &context)?;

            for path in &written {
                info!(path = %path.display(), "Written");
            }
        }
    }

    Ok(())
}

/// Loads the measurement file and computes the summaries. Any failure here
/// is fatal: nothing is served from a half-loaded report.
fn load_context(input: &Path) -> Result<ReportContext> {
    ReportContext::load(input).with_context(|| format!("loading {}", input.display()))
}
