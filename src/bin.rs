//! Binary entry point for `mention-bot`.
//!
//! This module provides the command-line interface for mention-bot with options
//! for the configuration file, the event payload, and logging verbosity. It
//! initializes logging, loads configuration, and handles the event.

use std::process::ExitCode;

use clap::Parser;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};
use mention_bot::base::{
    config::Config,
    types::{Res, Void},
};

/// Mention-bot – Slack DMs for GitHub @mentions.
///
/// Configuration can come from `config.toml`, GitHub Actions inputs
/// (`INPUT_*`), or `MENTION_BOT_*` environment variables. The event payload
/// is the JSON file GitHub Actions points to with `GITHUB_EVENT_PATH`.
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
struct Args {
    /// Override the config file path (optional).
    ///
    /// By default, the bot will look for a config file at `.hidden/config.toml`
    /// in the current directory.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Path to the webhook event payload.
    #[arg(short, long, env = "GITHUB_EVENT_PATH")]
    event: std::path::PathBuf,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: WARN level
    /// - -v: INFO level
    /// - -vv: DEBUG level
    /// - -vvv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Main entry point for the mention-bot binary.
///
/// Any failure is reported as a single GitHub Actions error annotation, and
/// the process exits non-zero.
#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let result = match init_tracing(args.verbose) {
        Ok(provider) => {
            let result = run(&args).await;

            if let Some(provider) = provider {
                shutdown_tracing(&provider);
            }

            result
        }
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("::error::{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Void {
    let config = Config::load(args.config.as_deref())?;

    mention_bot::start(config, &args.event).await
}

/// Set up logging; OTLP export is enabled when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
fn init_tracing(verbose: u8) -> Res<Option<SdkTracerProvider>> {
    // Construct the level filter.

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer.

    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_ansi(false)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    // Prepare the otlp layer.

    let provider = if std::env::var_os("OTEL_EXPORTER_OTLP_ENDPOINT").is_some() {
        let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
        Some(SdkTracerProvider::builder().with_simple_exporter(exporter).build())
    } else {
        None
    };

    let otel = provider.as_ref().map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer("mention-bot")));

    tracing_subscriber::registry().with(otel).with(level_filter).with(stderr).init();

    Ok(provider)
}

/// Flush and stop the OTLP exporter; returns whether it shut down cleanly.
fn shutdown_tracing(provider: &SdkTracerProvider) -> bool {
    match provider.shutdown() {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!("Failed to shut down the trace exporter: {err}");
            false
        }
    }
}
