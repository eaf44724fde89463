use std::path::Path;

use diesel::prelude::*;
use fl_core::ids::ButtonId;
use fl_core::ports::{KnownButtonStoreError, KnownButtonStorePort};
use tracing::{debug, warn};

use crate::db::models::{KnownButtonRow, NewKnownButtonRow};
use crate::db::schema::known_buttons::dsl::*;
use crate::db::{init_db_pool, DbExecutor, DieselSqliteExecutor};

/// Allow-list persisted in the `known_buttons` table.
pub struct SqliteKnownButtonStore<E = DieselSqliteExecutor> {
    executor: E,
}

impl SqliteKnownButtonStore<DieselSqliteExecutor> {
    /// Open (or create) the database at `path` and run pending migrations.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let pool = init_db_pool(path)?;
        Ok(Self::new(DieselSqliteExecutor::new(pool)))
    }
}

impl<E> SqliteKnownButtonStore<E>
where
    E: DbExecutor,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

impl<E> KnownButtonStorePort for SqliteKnownButtonStore<E>
where
    E: DbExecutor,
{
    fn list_all(&self) -> Result<Vec<ButtonId>, KnownButtonStoreError> {
        let rows = self
            .executor
            .run(|conn| {
                let rows = known_buttons.load::<KnownButtonRow>(conn)?;
                Ok(rows)
            })
            .map_err(|e| KnownButtonStoreError::Storage(e.to_string()))?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match ButtonId::parse(&row.mac) {
                Ok(id) => Some(id),
                Err(err) => {
                    warn!(mac = %row.mac, error = %err, "Skipping malformed stored button address");
                    None
                }
            })
            .collect())
    }

    fn add(&self, id: &ButtonId) -> Result<(), KnownButtonStoreError> {
        let row = NewKnownButtonRow { mac: id.as_str() };
        let inserted = self
            .executor
            .run(|conn| {
                let inserted = diesel::insert_or_ignore_into(known_buttons)
                    .values(&row)
                    .execute(conn)?;
                Ok(inserted)
            })
            .map_err(|e| KnownButtonStoreError::Storage(e.to_string()))?;
        debug!(button_id = %id, inserted, "Stored known button");
        Ok(())
    }

    fn remove(&self, id: &ButtonId) -> Result<(), KnownButtonStoreError> {
        self.executor
            .run(|conn| {
                diesel::delete(known_buttons.filter(mac.eq(id.as_str()))).execute(conn)?;
                Ok(())
            })
            .map_err(|e| KnownButtonStoreError::Storage(e.to_string()))
    }
}
