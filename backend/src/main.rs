//! PlantCare backend proxy
//!
//! Small HTTP service the client talks to for Google Cloud features that
//! need a server-held API key: batch translation, text-to-speech and
//! speech-to-text.

mod args;
mod error;
mod routes;
mod state;

use args::Args;
use clap::Parser;
use state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let addr = format!("{}:{}", args.host, args.port);
    let state = AppState::new(args);
    let router = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on http://{}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}
