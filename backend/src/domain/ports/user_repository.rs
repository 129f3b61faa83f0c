//! Port abstraction for user persistence adapters and their errors.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{NewUser, User};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
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

/// Persistence operations the user controllers depend on.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every user.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch one user by external-auth identifier.
    async fn find_by_cognito_id(
        &self,
        cognito_id: &str,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Create a user, assigning the next identifier.
    async fn create(&self, new_user: NewUser) -> Result<User, UserPersistenceError>;
}

/// In-memory user repository used in tests and as the no-database fallback
/// when the server runs without `DATABASE_URL`.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Start the repository with the given users.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.guard()?.clone())
    }

    async fn find_by_cognito_id(
        &self,
        cognito_id: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .guard()?
            .iter()
            .find(|user| user.cognito_id == cognito_id)
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, UserPersistenceError> {
        let mut users = self.guard()?;
        if users.iter().any(|user| user.cognito_id == new_user.cognito_id) {
            return Err(UserPersistenceError::query(format!(
                "duplicate key value for cognito id {}",
                new_user.cognito_id
            )));
        }

        let user_id = users.iter().map(|user| user.user_id).max().unwrap_or(0) + 1;
        let user = User {
            user_id,
            cognito_id: new_user.cognito_id,
            username: new_user.username,
            profile_picture_url: new_user.profile_picture_url,
            team_id: new_user.team_id,
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn new_user(cognito_id: &str) -> NewUser {
        NewUser {
            username: format!("user-{cognito_id}"),
            cognito_id: cognito_id.to_owned(),
            profile_picture_url: None,
            team_id: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_identifiers() {
        let repository = InMemoryUserRepository::default();

        let first = repository.create(new_user("a")).await.expect("create a");
        let second = repository.create(new_user("b")).await.expect("create b");

        assert_eq!(first.user_id, 1);
        assert_eq!(second.user_id, 2);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_cognito_ids() {
        let repository = InMemoryUserRepository::default();
        repository.create(new_user("a")).await.expect("first create");

        let err = repository
            .create(new_user("a"))
            .await
            .expect_err("duplicate rejected");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    #[case("present", true)]
    #[case("absent", false)]
    #[tokio::test]
    async fn find_by_cognito_id_matches_exactly(#[case] lookup: &str, #[case] found: bool) {
        let repository = InMemoryUserRepository::default();
        repository
            .create(new_user("present"))
            .await
            .expect("create");

        let result = repository
            .find_by_cognito_id(lookup)
            .await
            .expect("lookup succeeds");
        assert_eq!(result.is_some(), found);
    }
}
