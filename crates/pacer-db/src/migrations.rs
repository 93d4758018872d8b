//! Embedded schema migrations, applied in order on every open.
//!
//! Each script uses `IF NOT EXISTS`, so re-running is harmless.

use crate::PacerDb;
use crate::error::DatabaseError;

const MIGRATIONS: &[(&str, &str)] = &[(
    "001_initial",
    include_str!("../migrations/001_initial.sql"),
)];

impl PacerDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        for (name, sql) in MIGRATIONS {
            self.conn
                .execute_batch(sql)
                .await
                .map_err(|e| DatabaseError::Migration(format!("{name}: {e}")))?;
            tracing::trace!(migration = name, "applied");
        }
        Ok(())
    }
}
