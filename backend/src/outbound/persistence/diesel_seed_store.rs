//! PostgreSQL-backed seed store adapter.
//!
//! Implements the `SeedStore` port with one statement per call: a bare
//! `DELETE` for `clear` and an `INSERT ... ON CONFLICT DO NOTHING` keyed on
//! the identity column for `insert_if_absent`, which never updates existing
//! rows. Sequencing is the loader's responsibility.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{SeedPersistenceError, SeedStore};
use crate::domain::{EntityKind, SeedRecord};

use super::models::{
    SeedAttachmentRow, SeedCommentRow, SeedProjectRow, SeedProjectTeamRow, SeedTaskAssignmentRow,
    SeedTaskRow, SeedTeamRow, SeedUserRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{
    attachments, comments, project_teams, projects, task_assignments, tasks, teams, users,
};

/// Diesel-backed implementation of the seed store.
#[derive(Clone)]
pub struct DieselSeedStore {
    pool: DbPool,
}

impl DieselSeedStore {
    /// Create a new seed store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SeedPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            SeedPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> SeedPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel seed operation failed");
    match error {
        DieselError::NotFound => SeedPersistenceError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            SeedPersistenceError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => {
            SeedPersistenceError::query(info.message().to_owned())
        }
        other => SeedPersistenceError::query(other.to_string()),
    }
}

#[async_trait]
impl SeedStore for DieselSeedStore {
    async fn clear(&self, kind: EntityKind) -> Result<u64, SeedPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = match kind {
            EntityKind::TaskAssignment => {
                diesel::delete(task_assignments::table).execute(&mut conn).await
            }
            EntityKind::Comment => diesel::delete(comments::table).execute(&mut conn).await,
            EntityKind::Attachment => diesel::delete(attachments::table).execute(&mut conn).await,
            EntityKind::Task => diesel::delete(tasks::table).execute(&mut conn).await,
            EntityKind::ProjectTeam => {
                diesel::delete(project_teams::table).execute(&mut conn).await
            }
            EntityKind::Project => diesel::delete(projects::table).execute(&mut conn).await,
            EntityKind::User => diesel::delete(users::table).execute(&mut conn).await,
            EntityKind::Team => diesel::delete(teams::table).execute(&mut conn).await,
        }
        .map_err(map_diesel_error)?;

        Ok(removed as u64)
    }

    async fn insert_if_absent(&self, record: &SeedRecord) -> Result<bool, SeedPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let inserted = match record {
            SeedRecord::Team(team) => {
                diesel::insert_into(teams::table)
                    .values(SeedTeamRow::from(team))
                    .on_conflict(teams::id)
                    .do_nothing()
                    .execute(&mut conn)
                    .await
            }
            SeedRecord::User(user) => {
                diesel::insert_into(users::table)
                    .values(SeedUserRow::from(user))
                    .on_conflict(users::user_id)
                    .do_nothing()
                    .execute(&mut conn)
                    .await
            }
            SeedRecord::Project(project) => {
                diesel::insert_into(projects::table)
                    .values(SeedProjectRow::from(project))
                    .on_conflict(projects::id)
                    .do_nothing()
                    .execute(&mut conn)
                    .await
            }
            SeedRecord::ProjectTeam(link) => {
                diesel::insert_into(project_teams::table)
                    .values(SeedProjectTeamRow::from(link))
                    .on_conflict(project_teams::id)
                    .do_nothing()
                    .execute(&mut conn)
                    .await
            }
            SeedRecord::Task(task) => {
                diesel::insert_into(tasks::table)
                    .values(SeedTaskRow::from(task))
                    .on_conflict(tasks::id)
                    .do_nothing()
                    .execute(&mut conn)
                    .await
            }
            SeedRecord::TaskAssignment(assignment) => {
                diesel::insert_into(task_assignments::table)
                    .values(SeedTaskAssignmentRow::from(assignment))
                    .on_conflict(task_assignments::id)
                    .do_nothing()
                    .execute(&mut conn)
                    .await
            }
            SeedRecord::Comment(comment) => {
                diesel::insert_into(comments::table)
                    .values(SeedCommentRow::from(comment))
                    .on_conflict(comments::id)
                    .do_nothing()
                    .execute(&mut conn)
                    .await
            }
            SeedRecord::Attachment(attachment) => {
                diesel::insert_into(attachments::table)
                    .values(SeedAttachmentRow::from(attachment))
                    .on_conflict(attachments::id)
                    .do_nothing()
                    .execute(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        Ok(inserted > 0)
    }
}
