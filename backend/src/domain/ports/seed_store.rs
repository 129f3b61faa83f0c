//! Port abstraction for the reset-and-seed persistence adapter.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::{EntityKind, SeedRecord};

/// Persistence errors raised by seed store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedPersistenceError {
    /// Store connection could not be established.
    #[error("seed store connection failed: {message}")]
    Connection { message: String },
    /// Delete or insert failed during execution.
    #[error("seed store query failed: {message}")]
    Query { message: String },
}

impl SeedPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence operations the fixture loader depends on.
///
/// The loader imposes total ordering by awaiting every call before issuing
/// the next; implementations are not required to provide transactional
/// guarantees of their own.
#[async_trait]
pub trait SeedStore: Send + Sync {
    /// Delete every row of the given entity type. Returns the rows removed.
    async fn clear(&self, kind: EntityKind) -> Result<u64, SeedPersistenceError>;

    /// Insert the record unless a row with the same identity already exists.
    /// Existing rows are never updated. Returns `true` when a row was
    /// inserted, `false` when one was already present.
    async fn insert_if_absent(&self, record: &SeedRecord) -> Result<bool, SeedPersistenceError>;
}

type Tables = HashMap<EntityKind, BTreeMap<i32, SeedRecord>>;

/// Referenced parent rows a record depends on. Team's owner and manager ids
/// are deliberately absent: the schema declares them without foreign keys,
/// which is what lets teams seed before users.
fn parent_refs(record: &SeedRecord) -> Vec<(EntityKind, i32)> {
    match record {
        SeedRecord::Team(_) | SeedRecord::Project(_) => Vec::new(),
        SeedRecord::User(user) => user
            .team_id
            .map(|id| (EntityKind::Team, id))
            .into_iter()
            .collect(),
        SeedRecord::ProjectTeam(link) => vec![
            (EntityKind::Team, link.team_id),
            (EntityKind::Project, link.project_id),
        ],
        SeedRecord::Task(task) => {
            let mut refs = vec![
                (EntityKind::Project, task.project_id),
                (EntityKind::User, task.author_user_id),
            ];
            if let Some(assignee) = task.assigned_user_id {
                refs.push((EntityKind::User, assignee));
            }
            refs
        }
        SeedRecord::TaskAssignment(assignment) => vec![
            (EntityKind::User, assignment.user_id),
            (EntityKind::Task, assignment.task_id),
        ],
        SeedRecord::Comment(comment) => vec![
            (EntityKind::Task, comment.task_id),
            (EntityKind::User, comment.user_id),
        ],
        SeedRecord::Attachment(attachment) => vec![
            (EntityKind::Task, attachment.task_id),
            (EntityKind::User, attachment.uploaded_by_id),
        ],
    }
}

/// In-memory seed store enforcing the schema's referential constraints.
///
/// Used by the loader tests so ordering mistakes fail the same way they
/// would against PostgreSQL.
#[derive(Debug, Default)]
pub struct InMemorySeedStore {
    tables: Mutex<Tables>,
}

impl InMemorySeedStore {
    /// Identifiers currently stored for the entity type, ascending.
    pub fn ids(&self, kind: EntityKind) -> Vec<i32> {
        self.tables
            .lock()
            .map(|tables| {
                tables
                    .get(&kind)
                    .map(|rows| rows.keys().copied().collect())
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    /// Number of rows currently stored for the entity type.
    pub fn row_count(&self, kind: EntityKind) -> usize {
        self.ids(kind).len()
    }

    fn guard(&self) -> Result<MutexGuard<'_, Tables>, SeedPersistenceError> {
        self.tables
            .lock()
            .map_err(|_| SeedPersistenceError::query("seed store lock poisoned"))
    }
}

#[async_trait]
impl SeedStore for InMemorySeedStore {
    async fn clear(&self, kind: EntityKind) -> Result<u64, SeedPersistenceError> {
        let mut tables = self.guard()?;

        let target_ids: HashSet<i32> = tables
            .get(&kind)
            .map(|rows| rows.keys().copied().collect())
            .unwrap_or_default();
        if !target_ids.is_empty() {
            let blocked = tables
                .iter()
                .filter(|(other, _)| **other != kind)
                .flat_map(|(_, rows)| rows.values())
                .any(|record| {
                    parent_refs(record)
                        .iter()
                        .any(|(parent, id)| *parent == kind && target_ids.contains(id))
                });
            if blocked {
                return Err(SeedPersistenceError::query(format!(
                    "delete from \"{}\" violates a foreign key constraint",
                    kind.table_name()
                )));
            }
        }

        let removed = tables
            .get_mut(&kind)
            .map(|rows| {
                let count = rows.len();
                rows.clear();
                count
            })
            .unwrap_or(0);
        Ok(removed as u64)
    }

    async fn insert_if_absent(&self, record: &SeedRecord) -> Result<bool, SeedPersistenceError> {
        let mut tables = self.guard()?;
        let kind = record.kind();

        let exists = tables
            .get(&kind)
            .is_some_and(|rows| rows.contains_key(&record.id()));
        if exists {
            return Ok(false);
        }

        for (parent, id) in parent_refs(record) {
            let present = tables
                .get(&parent)
                .is_some_and(|rows| rows.contains_key(&id));
            if !present {
                return Err(SeedPersistenceError::query(format!(
                    "insert into \"{}\" violates a foreign key constraint on \"{}\"",
                    kind.table_name(),
                    parent.table_name()
                )));
            }
        }

        tables
            .entry(kind)
            .or_default()
            .insert(record.id(), record.clone());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Team, User};
    use rstest::rstest;

    fn team(id: i32) -> SeedRecord {
        SeedRecord::Team(Team {
            id,
            team_name: format!("team-{id}"),
            product_owner_user_id: None,
            project_manager_user_id: None,
        })
    }

    fn user(user_id: i32, team_id: Option<i32>) -> SeedRecord {
        SeedRecord::User(User {
            user_id,
            cognito_id: format!("cog-{user_id}"),
            username: format!("user-{user_id}"),
            profile_picture_url: None,
            team_id,
        })
    }

    #[tokio::test]
    async fn insert_if_absent_skips_existing_identifiers() {
        let store = InMemorySeedStore::default();

        assert!(store.insert_if_absent(&team(1)).await.expect("insert"));
        assert!(!store.insert_if_absent(&team(1)).await.expect("reinsert"));
        assert_eq!(store.ids(EntityKind::Team), vec![1]);
    }

    #[tokio::test]
    async fn insert_if_absent_rejects_missing_parents() {
        let store = InMemorySeedStore::default();

        let err = store
            .insert_if_absent(&user(1, Some(7)))
            .await
            .expect_err("missing team rejected");
        assert!(err.to_string().contains("foreign key"));
    }

    #[tokio::test]
    async fn clear_rejects_tables_with_dependents() {
        let store = InMemorySeedStore::default();
        store.insert_if_absent(&team(1)).await.expect("team");
        store.insert_if_absent(&user(1, Some(1))).await.expect("user");

        let err = store
            .clear(EntityKind::Team)
            .await
            .expect_err("users still reference the team");
        assert!(matches!(err, SeedPersistenceError::Query { .. }));

        store.clear(EntityKind::User).await.expect("users clear");
        let removed = store.clear(EntityKind::Team).await.expect("teams clear");
        assert_eq!(removed, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn clear_of_an_empty_table_removes_nothing() {
        let store = InMemorySeedStore::default();
        let removed = store.clear(EntityKind::Comment).await.expect("clear");
        assert_eq!(removed, 0);
    }
}
