use anyhow::Result;
use scavenger_server::Config;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().nth(1).as_deref() == Some("--example-config") {
        print!("{}", Config::example()?);
        return Ok(());
    }

    let config = Config::load_default()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.filter)),
        )
        .init();

    tracing::info!("Scavenger collector starting...");
    tracing::info!("Database: {}", config.database.path.display());

    let db = scavenger_server::open_store(&config.database).await?;
    let stored = db.applications().count().await?;
    tracing::info!("Application store ready ({} applications)", stored);

    Ok(())
}
