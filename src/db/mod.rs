mod models;
mod student_repository;

use crate::config::AppConfig;
use crate::constants::CREATE_STUDENTS_TABLE;
use crate::errors::Error;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub use models::*;
pub use student_repository::*;

/// Pragmas applied to every pooled connection when it is first opened
#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout_ms: u64,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON;",
            self.busy_timeout_ms
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

#[derive(Clone, Debug)]
pub struct Database {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl Database {
    /// Opens a connection pool on the SQLite file named in `config`
    ///
    /// # Errors
    ///
    /// Returns an Error if the pool cannot open its initial connections
    pub fn new(config: &AppConfig) -> Result<Self, Error> {
        let manager = ConnectionManager::<SqliteConnection>::new(&config.database_path);
        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout_ms: config.busy_timeout_ms,
            }))
            .build(manager)?;

        info!(
            "Opened database {} with {} pooled connections",
            config.database_path, config.pool_size
        );

        Ok(Database {
            pool: Arc::new(pool),
        })
    }

    /// Checks a connection out of the pool; it goes back when dropped
    pub fn get_conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>, Error> {
        Ok(self.pool.get()?)
    }

    /// Creates the students table when it does not exist yet
    pub fn init_schema(&self) -> Result<(), Error> {
        let mut conn = self.get_conn()?;
        conn.batch_execute(CREATE_STUDENTS_TABLE)?;
        Ok(())
    }
}
