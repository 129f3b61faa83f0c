//! Domain types and ports, independent of transport and persistence.

mod entities;
mod error;
pub mod ports;
mod seeding;

pub use entities::{
    Attachment, Comment, NewUser, Project, ProjectTeam, Task, TaskAssignment, Team, User,
    DEFAULT_PROFILE_PICTURE_URL, DEFAULT_TEAM_ID,
};
pub use error::DomainError;
pub use seeding::{EntityKind, EntityRecords, FixtureError, SeedRecord};
