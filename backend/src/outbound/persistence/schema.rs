//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation. When
//! a migration changes the schema, update this file to match (or regenerate
//! it with `diesel print-schema`).

diesel::table! {
    /// Teams of users. The owner and manager columns are plain identifiers,
    /// not foreign keys, so team rows can exist before any user row.
    teams (id) {
        id -> Int4,
        team_name -> Varchar,
        product_owner_user_id -> Nullable<Int4>,
        project_manager_user_id -> Nullable<Int4>,
    }
}

diesel::table! {
    /// Registered users, keyed by `user_id` and unique per `cognito_id`.
    users (user_id) {
        user_id -> Int4,
        cognito_id -> Varchar,
        username -> Varchar,
        profile_picture_url -> Nullable<Varchar>,
        team_id -> Nullable<Int4>,
    }
}

diesel::table! {
    /// Units of work, linked to teams through `project_teams`.
    projects (id) {
        id -> Int4,
        name -> Varchar,
        description -> Nullable<Text>,
        start_date -> Nullable<Timestamptz>,
        end_date -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Join relation between projects and teams.
    project_teams (id) {
        id -> Int4,
        team_id -> Int4,
        project_id -> Int4,
    }
}

diesel::table! {
    /// Tasks inside a project.
    tasks (id) {
        id -> Int4,
        title -> Varchar,
        description -> Nullable<Text>,
        status -> Nullable<Varchar>,
        priority -> Nullable<Varchar>,
        tags -> Nullable<Varchar>,
        start_date -> Nullable<Timestamptz>,
        due_date -> Nullable<Timestamptz>,
        points -> Nullable<Int4>,
        project_id -> Int4,
        author_user_id -> Int4,
        assigned_user_id -> Nullable<Int4>,
    }
}

diesel::table! {
    /// Join relation between tasks and the users working on them.
    task_assignments (id) {
        id -> Int4,
        user_id -> Int4,
        task_id -> Int4,
    }
}

diesel::table! {
    /// Comments left on tasks.
    comments (id) {
        id -> Int4,
        text -> Text,
        task_id -> Int4,
        user_id -> Int4,
    }
}

diesel::table! {
    /// Files attached to tasks.
    attachments (id) {
        id -> Int4,
        file_url -> Varchar,
        file_name -> Nullable<Varchar>,
        task_id -> Int4,
        uploaded_by_id -> Int4,
    }
}
