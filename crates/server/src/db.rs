use anyhow::Context;
use logicode_migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::info;

pub async fn init_pool_and_migrate(database_url: Option<&str>) -> anyhow::Result<DatabaseConnection> {
    let database_url = database_url.context("DATABASE_URL is not set")?;

    let db = Database::connect(database_url)
        .await
        .context("failed to connect to database")?;

    Migrator::up(&db, None)
        .await
        .context("failed to apply migrations")?;
    info!("database migrations applied");

    Ok(db)
}
