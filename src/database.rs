use deadpool_sqlite::{Config, CreatePoolError, InteractError, Pool, PoolError, Runtime};
use log::{debug, info};
use rusqlite::Connection;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqliteDatabaseError {
    #[error("Could not open database: {source}")]
    RusqliteError {
        #[from]
        source: rusqlite::Error,
    },
    #[error("Could not apply migrations: {source}")]
    MigrationError {
        #[from]
        source: refinery::Error,
    },
    #[error("Could not setup database connection pool: {source}")]
    CreatePoolError {
        #[from]
        source: CreatePoolError,
    },
    #[error("Could not get a connection from the pool: {source}")]
    PoolError {
        #[from]
        source: PoolError,
    },
    #[error("Database task did not complete: {message}")]
    InteractError { message: String },
}

impl From<InteractError> for SqliteDatabaseError {
    fn from(err: InteractError) -> Self {
        SqliteDatabaseError::InteractError {
            message: err.to_string(),
        }
    }
}

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("./sql_migrations");
}

pub fn apply_migrations(connection: &mut Connection) -> Result<(), SqliteDatabaseError> {
    let report = embedded::migrations::runner().run(connection)?;
    debug!("Applied migrations\n{:?}", report);
    Ok(())
}

/// Create a connection pool for the sqlite database at `file_path`.
///
/// One connection is opened eagerly to bring the schema up to date, so a
/// database that cannot be opened fails here rather than on the first request.
pub async fn create_sqlite_pool(file_path: impl Into<PathBuf>) -> Result<Pool, SqliteDatabaseError> {
    let file_path = file_path.into();
    info!("Opening sqlite database at {}", file_path.display());
    let pool = Config::new(&file_path).create_pool(Runtime::Tokio1)?;
    let connection = pool.get().await?;
    connection.interact(apply_migrations).await??;
    Ok(pool)
}
