//! Test utilities for database-backed tests
//!
//! Every `TestDatabase` is a private in-memory SQLite database with the
//! migrations applied, so tests never share state.

use crate::{establish_connection, seed_people, DbConnection, PersonSeed};
use datagrid_core::DatabaseConfig;
use std::sync::Arc;

pub struct TestDatabase {
    pub db: Arc<DbConnection>,
}

impl TestDatabase {
    /// Fresh, migrated, empty database
    pub async fn new() -> anyhow::Result<Self> {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        };
        let db = establish_connection(&config).await?;
        Ok(Self { db })
    }

    /// Fresh database holding `rows` in `people`
    pub async fn with_people(rows: &[PersonSeed]) -> anyhow::Result<Self> {
        let test_db = Self::new().await?;
        seed_people(test_db.db.as_ref(), rows).await?;
        Ok(test_db)
    }

    pub fn connection(&self) -> Arc<DbConnection> {
        self.db.clone()
    }
}
