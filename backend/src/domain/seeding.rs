//! Fixture model for the reset-and-seed procedure.
//!
//! The entity-type order is a declared constant standing in for a topological
//! sort over the schema's foreign-key graph: children come before the rows
//! they reference. Deletion walks the order as written; seeding walks it in
//! reverse. If the schema's relationships change, [`EntityKind::RESET_ORDER`]
//! must be updated by hand.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::entities::{
    Attachment, Comment, Project, ProjectTeam, Task, TaskAssignment, Team, User,
};

/// The eight entity types the loader knows how to reset and seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    TaskAssignment,
    Comment,
    Attachment,
    Task,
    ProjectTeam,
    Project,
    User,
    Team,
}

impl EntityKind {
    /// Child-first deletion order. Seeding uses the exact reverse so parent
    /// rows exist before dependents are inserted.
    pub const RESET_ORDER: [Self; 8] = [
        Self::TaskAssignment,
        Self::Comment,
        Self::Attachment,
        Self::Task,
        Self::ProjectTeam,
        Self::Project,
        Self::User,
        Self::Team,
    ];

    /// Declared fixture file stem for this entity type. This table couples
    /// the fixture naming convention to the schema naming convention; both
    /// sides must stay in step.
    pub const fn fixture_file_stem(self) -> &'static str {
        match self {
            Self::TaskAssignment => "taskAssignment",
            Self::Comment => "comment",
            Self::Attachment => "attachment",
            Self::Task => "task",
            Self::ProjectTeam => "projectTeam",
            Self::Project => "project",
            Self::User => "user",
            Self::Team => "team",
        }
    }

    /// Schema relation backing this entity type.
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::TaskAssignment => "task_assignments",
            Self::Comment => "comments",
            Self::Attachment => "attachments",
            Self::Task => "tasks",
            Self::ProjectTeam => "project_teams",
            Self::Project => "projects",
            Self::User => "users",
            Self::Team => "teams",
        }
    }

    /// Fixture file name, stem plus the `.json` extension.
    pub fn fixture_file_name(self) -> String {
        format!("{}.json", self.fixture_file_stem())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TaskAssignment => "TaskAssignment",
            Self::Comment => "Comment",
            Self::Attachment => "Attachment",
            Self::Task => "Task",
            Self::ProjectTeam => "ProjectTeam",
            Self::Project => "Project",
            Self::User => "User",
            Self::Team => "Team",
        };
        f.write_str(name)
    }
}

/// Failures reading or decoding one fixture file.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The fixture directory could not be opened.
    #[error("failed to open fixture directory {path}: {source}")]
    OpenDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The fixture file is missing or unreadable.
    #[error("failed to read fixture {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },
    /// The fixture file is not a JSON array.
    #[error("fixture {file} is not a JSON array of records: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    /// A record in the array does not match the entity shape.
    #[error("fixture {file} holds records incompatible with {kind}: {source}")]
    Shape {
        file: String,
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },
}

/// One fixture record, tagged with its entity type.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedRecord {
    TaskAssignment(TaskAssignment),
    Comment(Comment),
    Attachment(Attachment),
    Task(Task),
    ProjectTeam(ProjectTeam),
    Project(Project),
    User(User),
    Team(Team),
}

impl SeedRecord {
    /// Entity type this record belongs to.
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::TaskAssignment(_) => EntityKind::TaskAssignment,
            Self::Comment(_) => EntityKind::Comment,
            Self::Attachment(_) => EntityKind::Attachment,
            Self::Task(_) => EntityKind::Task,
            Self::ProjectTeam(_) => EntityKind::ProjectTeam,
            Self::Project(_) => EntityKind::Project,
            Self::User(_) => EntityKind::User,
            Self::Team(_) => EntityKind::Team,
        }
    }

    /// Stable identity field used as the insert-if-absent key.
    pub const fn id(&self) -> i32 {
        match self {
            Self::TaskAssignment(r) => r.id,
            Self::Comment(r) => r.id,
            Self::Attachment(r) => r.id,
            Self::Task(r) => r.id,
            Self::ProjectTeam(r) => r.id,
            Self::Project(r) => r.id,
            Self::User(r) => r.user_id,
            Self::Team(r) => r.id,
        }
    }
}

/// The decoded contents of one fixture file, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecords {
    kind: EntityKind,
    records: Vec<SeedRecord>,
}

impl EntityRecords {
    /// Decode a fixture payload for the given entity type.
    ///
    /// Decoding is two-stage so the error distinguishes a file that is not a
    /// JSON array from one whose records do not match the entity shape.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Parse`] when the payload is not a JSON array
    /// and [`FixtureError::Shape`] when a record fails to decode.
    pub fn parse(kind: EntityKind, payload: &str, file: &str) -> Result<Self, FixtureError> {
        let values: Vec<Value> = serde_json::from_str(payload).map_err(|source| {
            FixtureError::Parse {
                file: file.to_owned(),
                source,
            }
        })?;

        let records = match kind {
            EntityKind::TaskAssignment => decode(values, file, kind, SeedRecord::TaskAssignment)?,
            EntityKind::Comment => decode(values, file, kind, SeedRecord::Comment)?,
            EntityKind::Attachment => decode(values, file, kind, SeedRecord::Attachment)?,
            EntityKind::Task => decode(values, file, kind, SeedRecord::Task)?,
            EntityKind::ProjectTeam => decode(values, file, kind, SeedRecord::ProjectTeam)?,
            EntityKind::Project => decode(values, file, kind, SeedRecord::Project)?,
            EntityKind::User => decode(values, file, kind, SeedRecord::User)?,
            EntityKind::Team => decode(values, file, kind, SeedRecord::Team)?,
        };

        Ok(Self { kind, records })
    }

    /// Entity type the records belong to.
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Number of records in the fixture.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the fixture holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the fixture, yielding records in file order.
    pub fn into_records(self) -> Vec<SeedRecord> {
        self.records
    }
}

fn decode<T: DeserializeOwned>(
    values: Vec<Value>,
    file: &str,
    kind: EntityKind,
    wrap: impl Fn(T) -> SeedRecord,
) -> Result<Vec<SeedRecord>, FixtureError> {
    values
        .into_iter()
        .map(|value| {
            serde_json::from_value::<T>(value)
                .map(&wrap)
                .map_err(|source| FixtureError::Shape {
                    file: file.to_owned(),
                    kind,
                    source,
                })
        })
        .collect()
}
