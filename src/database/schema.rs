use tracing::info;

use super::{Database, DatabaseError};

/// Apply the embedded migrations in `migrations/`. Already applied versions are skipped.
pub async fn run_migrations(db: &Database) -> Result<(), DatabaseError> {
    info!("Running migrations against {}", db.name());
    sqlx::migrate!("./migrations").run(db.pool()).await?;
    info!("Database schema is up to date");
    Ok(())
}
