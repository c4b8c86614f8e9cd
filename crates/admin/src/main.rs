use anyhow::Context;
use clap::Parser;
use gallery_admin::cli::{Cli, Command};
use gallery_admin::commands;
use gallery_admin::config::AdminConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gallery_admin=info,gallery_approval=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AdminConfig::from_env()?;

    let pool = gallery_db::create_pool(&config.database_url, config.max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::debug!(max_connections = config.max_connections, "Database connection pool created");

    gallery_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    if config.run_migrations && !matches!(cli.command, Command::Migrate) {
        gallery_db::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    }

    let output = commands::run(&pool, cli.command, cli.json).await?;
    println!("{output}");

    pool.close().await;
    Ok(())
}
