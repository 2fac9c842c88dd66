//! PolicyBriefly: plain-language briefings for regulatory documents.

use std::sync::Arc;

use policybriefly_core::BrieflyConfig;
use policybriefly_ingest::sample::epa_sample;
use policybriefly_ingest::Loader;
use policybriefly_server::cli::{self, Command};
use policybriefly_server::{build_router, AppState, Pipeline};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match cli::parse_args(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    };

    if command == Command::Help {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    let config = BrieflyConfig::from_env()?;

    match command {
        Command::Help => Ok(()),
        Command::Analyze {
            path,
            options,
            format,
        } => {
            let pipeline = Pipeline::from_config(&config)?;
            let document = Loader::new(config.max_upload_bytes).load_path(&path)?;
            let report = cli::analyze_document(&pipeline, &document, &options, format).await?;
            println!("{}", report);
            Ok(())
        }
        Command::Sample { options, format } => {
            let pipeline = Pipeline::from_config(&config)?;
            let report = cli::analyze_document(&pipeline, &epa_sample(), &options, format).await?;
            println!("{}", report);
            Ok(())
        }
        Command::Serve => serve(config).await,
    }
}

async fn serve(config: BrieflyConfig) -> anyhow::Result<()> {
    let port = config.port;
    if config.has_credential() {
        info!("Remote summaries via {} model {}", config.provider, config.model);
    } else {
        info!("No API credential configured; summaries are rule-based unless a request supplies a token");
    }

    // Build application state
    let state = Arc::new(AppState::from_config(config)?);

    // Build router
    let app = build_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("PolicyBriefly server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
