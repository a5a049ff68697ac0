use anyhow::Result;
use sqlx::{Sqlite, migrate::MigrateDatabase};
use sqlx_migrator::{Migrate, Plan};

use jointravel::Config;

#[tracing::instrument(skip(config))]
pub async fn migrate(config: &Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    if !Sqlite::database_exists(&config.database.url).await? {
        tracing::info!("Database does not exist, creating: {}", config.database.url);
        Sqlite::create_database(&config.database.url).await?;
    }

    let pool = jointravel::create_pool(&config.database.url, 1).await?;
    let mut conn = pool.acquire().await?;
    jointravel_db::migrator::<Sqlite>()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;
    drop(conn);
    pool.close().await;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn reset(config: &Config) -> Result<()> {
    tracing::info!("Resetting database...");

    if Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!("Dropping existing database: {}", config.database.url);
        Sqlite::drop_database(&config.database.url).await?;
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    migrate(config).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}
