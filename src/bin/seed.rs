//! Wipe and reload the database from `$SEED_DATA_DIR/{categories,transactions}.json`

use fintech_dashboard_core::core::config::{load_dotenv, SeedConfig};
use fintech_dashboard_core::core::{database, logging};
use fintech_dashboard_core::modules::seed::{seed_database, SeedDocument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    logging::init_tracing();

    let config = SeedConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let pool = database::create_pool(&config.database).await?;
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    tracing::info!("Loading seed data from {}", config.data_dir.display());
    let document = SeedDocument::load(&config.data_dir)?;

    match seed_database(&pool, &document).await {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!("Error seeding database: {}", e);
            Err(e.into())
        }
    }
}
