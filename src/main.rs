use clap::Parser;
use sqlite_gateway::{run, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sqlite_gateway=info,tower_http=info")),
        )
        .init();

    let settings = Settings::parse();
    run(settings).await?;
    Ok(())
}
