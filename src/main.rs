use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` is optional; real deployments pass variables directly.
    if let Err(err) = dotenvy::dotenv() {
        eprintln!("no .env loaded: {err}");
    }

    tracing_subscriber::registry()
        .with(ai_llm_service::telemetry::default_filter())
        .with(ai_llm_service::telemetry::layer())
        .init();

    api::start().await?;

    Ok(())
}
