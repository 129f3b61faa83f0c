//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer, never exposed to the
//! domain. The `Seed*` insert rows carry explicit identifiers because the
//! fixture loader supplies them; `NewUserRow` omits the identifier so the
//! database sequence assigns it for users created over HTTP.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Attachment, Comment, NewUser, Project, ProjectTeam, Task, TaskAssignment, Team, User,
};

use super::schema::{
    attachments, comments, project_teams, projects, task_assignments, tasks, teams, users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub user_id: i32,
    pub cognito_id: String,
    pub username: String,
    pub profile_picture_url: Option<String>,
    pub team_id: Option<i32>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.user_id,
            cognito_id: row.cognito_id,
            username: row.username,
            profile_picture_url: row.profile_picture_url,
            team_id: row.team_id,
        }
    }
}

/// Insertable struct for users created over HTTP; the database assigns the
/// identifier.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub cognito_id: &'a str,
    pub username: &'a str,
    pub profile_picture_url: Option<&'a str>,
    pub team_id: Option<i32>,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(new_user: &'a NewUser) -> Self {
        Self {
            cognito_id: &new_user.cognito_id,
            username: &new_user.username,
            profile_picture_url: new_user.profile_picture_url.as_deref(),
            team_id: new_user.team_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Seed insert rows, one per table, identifiers supplied by the fixtures
// ---------------------------------------------------------------------------

/// Insertable fixture row for the teams table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = teams)]
pub(crate) struct SeedTeamRow<'a> {
    pub id: i32,
    pub team_name: &'a str,
    pub product_owner_user_id: Option<i32>,
    pub project_manager_user_id: Option<i32>,
}

impl<'a> From<&'a Team> for SeedTeamRow<'a> {
    fn from(team: &'a Team) -> Self {
        Self {
            id: team.id,
            team_name: &team.team_name,
            product_owner_user_id: team.product_owner_user_id,
            project_manager_user_id: team.project_manager_user_id,
        }
    }
}

/// Insertable fixture row for the users table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct SeedUserRow<'a> {
    pub user_id: i32,
    pub cognito_id: &'a str,
    pub username: &'a str,
    pub profile_picture_url: Option<&'a str>,
    pub team_id: Option<i32>,
}

impl<'a> From<&'a User> for SeedUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            user_id: user.user_id,
            cognito_id: &user.cognito_id,
            username: &user.username,
            profile_picture_url: user.profile_picture_url.as_deref(),
            team_id: user.team_id,
        }
    }
}

/// Insertable fixture row for the projects table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub(crate) struct SeedProjectRow<'a> {
    pub id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl<'a> From<&'a Project> for SeedProjectRow<'a> {
    fn from(project: &'a Project) -> Self {
        Self {
            id: project.id,
            name: &project.name,
            description: project.description.as_deref(),
            start_date: project.start_date,
            end_date: project.end_date,
        }
    }
}

/// Insertable fixture row for the project_teams table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = project_teams)]
pub(crate) struct SeedProjectTeamRow {
    pub id: i32,
    pub team_id: i32,
    pub project_id: i32,
}

impl From<&ProjectTeam> for SeedProjectTeamRow {
    fn from(link: &ProjectTeam) -> Self {
        Self {
            id: link.id,
            team_id: link.team_id,
            project_id: link.project_id,
        }
    }
}

/// Insertable fixture row for the tasks table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct SeedTaskRow<'a> {
    pub id: i32,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub tags: Option<&'a str>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub points: Option<i32>,
    pub project_id: i32,
    pub author_user_id: i32,
    pub assigned_user_id: Option<i32>,
}

impl<'a> From<&'a Task> for SeedTaskRow<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            id: task.id,
            title: &task.title,
            description: task.description.as_deref(),
            status: task.status.as_deref(),
            priority: task.priority.as_deref(),
            tags: task.tags.as_deref(),
            start_date: task.start_date,
            due_date: task.due_date,
            points: task.points,
            project_id: task.project_id,
            author_user_id: task.author_user_id,
            assigned_user_id: task.assigned_user_id,
        }
    }
}

/// Insertable fixture row for the task_assignments table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_assignments)]
pub(crate) struct SeedTaskAssignmentRow {
    pub id: i32,
    pub user_id: i32,
    pub task_id: i32,
}

impl From<&TaskAssignment> for SeedTaskAssignmentRow {
    fn from(assignment: &TaskAssignment) -> Self {
        Self {
            id: assignment.id,
            user_id: assignment.user_id,
            task_id: assignment.task_id,
        }
    }
}

/// Insertable fixture row for the comments table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct SeedCommentRow<'a> {
    pub id: i32,
    pub text: &'a str,
    pub task_id: i32,
    pub user_id: i32,
}

impl<'a> From<&'a Comment> for SeedCommentRow<'a> {
    fn from(comment: &'a Comment) -> Self {
        Self {
            id: comment.id,
            text: &comment.text,
            task_id: comment.task_id,
            user_id: comment.user_id,
        }
    }
}

/// Insertable fixture row for the attachments table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = attachments)]
pub(crate) struct SeedAttachmentRow<'a> {
    pub id: i32,
    pub file_url: &'a str,
    pub file_name: Option<&'a str>,
    pub task_id: i32,
    pub uploaded_by_id: i32,
}

impl<'a> From<&'a Attachment> for SeedAttachmentRow<'a> {
    fn from(attachment: &'a Attachment) -> Self {
        Self {
            id: attachment.id,
            file_url: &attachment.file_url,
            file_name: attachment.file_name.as_deref(),
            task_id: attachment.task_id,
            uploaded_by_id: attachment.uploaded_by_id,
        }
    }
}
