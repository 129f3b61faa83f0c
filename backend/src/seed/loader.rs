//! Reset-and-seed orchestration.
//!
//! The loader walks the declared entity order strictly in sequence, awaiting
//! every store call before issuing the next. That total ordering is the
//! substitute for transactional guarantees: parent rows are in place before
//! any dependent row is inserted, and dependents are gone before their
//! parents are deleted.
//!
//! Each entity type is best-effort. A failure is logged with the type name
//! and the loader moves on; the procedure always runs the full list and
//! reports its outcome only through logs. A partial reset or seed therefore
//! leaves a log trail rather than an error value.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::ports::{SeedPersistenceError, SeedStore};
use crate::domain::{EntityKind, FixtureError};

use super::fixtures::FixtureDirectory;

#[derive(Debug, thiserror::Error)]
enum SeedEntityError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    #[error(transparent)]
    Store(#[from] SeedPersistenceError),
}

/// Orchestrates the reset and seed phases over a seed store and a fixture
/// directory.
pub struct SeedLoader {
    store: Arc<dyn SeedStore>,
    fixtures: FixtureDirectory,
}

impl SeedLoader {
    /// Create a loader over the given store and fixture directory.
    pub fn new(store: Arc<dyn SeedStore>, fixtures: FixtureDirectory) -> Self {
        Self { store, fixtures }
    }

    /// Delete all rows of every entity type, children before parents.
    pub async fn reset(&self) {
        for kind in EntityKind::RESET_ORDER {
            match self.store.clear(kind).await {
                Ok(rows) => info!(entity = %kind, rows, "cleared entity table"),
                Err(err) => error!(entity = %kind, error = %err, "failed to clear entity table"),
            }
        }
    }

    /// Insert fixture records for every entity type, parents before children.
    ///
    /// Within one entity type, records are inserted one at a time in file
    /// order, so later records may reference earlier ones. An existing row
    /// with the same identity is skipped, never updated, which makes a
    /// repeated seed pass a no-op.
    pub async fn seed(&self) {
        for kind in EntityKind::RESET_ORDER.into_iter().rev() {
            if let Err(err) = self.seed_entity(kind).await {
                error!(entity = %kind, error = %err, "failed to seed entity type");
            }
        }
    }

    /// Run the full procedure: reset, then seed.
    pub async fn run(&self) {
        self.reset().await;
        self.seed().await;
    }

    async fn seed_entity(&self, kind: EntityKind) -> Result<(), SeedEntityError> {
        let records = self.fixtures.load(kind)?;
        let file = kind.fixture_file_name();

        let mut inserted = 0_usize;
        let mut skipped = 0_usize;
        for record in records.into_records() {
            if self.store.insert_if_absent(&record).await? {
                inserted += 1;
            } else {
                skipped += 1;
            }
        }

        info!(entity = %kind, file = %file, inserted, skipped, "seeded entity type");
        Ok(())
    }
}
