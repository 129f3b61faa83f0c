//! Entity records for the project/task-management schema.
//!
//! These types are shared by the fixture files and the HTTP wire: each field
//! maps one-to-one onto a schema column and serialises in camelCase. Fixture
//! records carry explicit integer identifiers; rows created over HTTP receive
//! theirs from the database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default profile picture applied when `POST /users` omits one.
pub const DEFAULT_PROFILE_PICTURE_URL: &str = "i1.jpg";

/// Default team applied when `POST /users` omits one.
pub const DEFAULT_TEAM_ID: i32 = 1;

/// A group of users. The owner/manager references are plain identifiers
/// without enforced foreign keys, which is what allows teams to seed before
/// users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i32,
    pub team_name: String,
    #[serde(default)]
    pub product_owner_user_id: Option<i32>,
    #[serde(default)]
    pub project_manager_user_id: Option<i32>,
}

/// A registered user, keyed internally by `user_id` and externally by the
/// authentication provider's `cognito_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i32,
    pub cognito_id: String,
    pub username: String,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub team_id: Option<i32>,
}

/// Payload for creating a user over HTTP. The identifier is assigned by the
/// database; the optional fields have declared defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub cognito_id: String,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub team_id: Option<i32>,
}

impl NewUser {
    /// Fill the optional fields with their declared defaults when absent.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.profile_picture_url
            .get_or_insert_with(|| DEFAULT_PROFILE_PICTURE_URL.to_owned());
        self.team_id.get_or_insert(DEFAULT_TEAM_ID);
        self
    }
}

/// A unit of work, associated with teams through [`ProjectTeam`] rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// Join row linking a project and a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTeam {
    pub id: i32,
    pub team_id: i32,
    pub project_id: i32,
}

/// A task inside a project, with optional workflow metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub points: Option<i32>,
    pub project_id: i32,
    pub author_user_id: i32,
    #[serde(default)]
    pub assigned_user_id: Option<i32>,
}

/// Join row linking a task and a user working on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignment {
    pub id: i32,
    pub user_id: i32,
    pub task_id: i32,
}

/// A comment left on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i32,
    pub text: String,
    pub task_id: i32,
    pub user_id: i32,
}

/// A file attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: i32,
    pub file_url: String,
    #[serde(default)]
    pub file_name: Option<String>,
    pub task_id: i32,
    pub uploaded_by_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{json, Value};

    #[rstest]
    fn user_serialises_in_camel_case() {
        let user = User {
            user_id: 7,
            cognito_id: "abc-123".into(),
            username: "ada".into(),
            profile_picture_url: Some("i1.jpg".into()),
            team_id: Some(1),
        };

        let value = serde_json::to_value(&user).expect("user serialises");
        assert_eq!(value.get("userId"), Some(&json!(7)));
        assert_eq!(value.get("cognitoId"), Some(&json!("abc-123")));
        assert_eq!(value.get("profilePictureUrl"), Some(&json!("i1.jpg")));
        assert!(value.get("user_id").is_none());
    }

    #[rstest]
    fn absent_optional_fields_deserialise_as_none() {
        let task: Task = serde_json::from_value(json!({
            "id": 1,
            "title": "Design the schema",
            "projectId": 2,
            "authorUserId": 3,
        }))
        .expect("minimal task deserialises");

        assert_eq!(task.status, None);
        assert_eq!(task.points, None);
        assert_eq!(task.assigned_user_id, None);
    }

    #[rstest]
    fn optional_fields_serialise_as_null() {
        let team = Team {
            id: 1,
            team_name: "Core".into(),
            product_owner_user_id: None,
            project_manager_user_id: None,
        };

        let value = serde_json::to_value(&team).expect("team serialises");
        assert_eq!(value.get("productOwnerUserId"), Some(&Value::Null));
    }

    #[rstest]
    fn new_user_defaults_fill_only_absent_fields() {
        let minimal = NewUser {
            username: "ada".into(),
            cognito_id: "abc".into(),
            profile_picture_url: None,
            team_id: None,
        }
        .with_defaults();
        assert_eq!(
            minimal.profile_picture_url.as_deref(),
            Some(DEFAULT_PROFILE_PICTURE_URL)
        );
        assert_eq!(minimal.team_id, Some(DEFAULT_TEAM_ID));

        let explicit = NewUser {
            username: "ada".into(),
            cognito_id: "abc".into(),
            profile_picture_url: Some("custom.png".into()),
            team_id: Some(4),
        }
        .with_defaults();
        assert_eq!(explicit.profile_picture_url.as_deref(), Some("custom.png"));
        assert_eq!(explicit.team_id, Some(4));
    }
}
