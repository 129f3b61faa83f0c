//! User controllers.
//!
//! ```text
//! GET  /users
//! GET  /users/{cognitoId}
//! POST /users {"username":"ada","cognitoId":"abc-123"}
//! ```
//!
//! Each handler performs exactly one repository call and serialises the
//! result; failures surface as 500 responses with a `message` body.

use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

use crate::domain::ports::UserPersistenceError;
use crate::domain::{DomainError, NewUser, User};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

fn map_persistence_error(err: UserPersistenceError) -> DomainError {
    DomainError::new(err.to_string())
}

/// List every user.
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list().await.map_err(map_persistence_error)?;
    Ok(web::Json(users))
}

/// Fetch one user by external-auth identifier. An unknown identifier yields
/// a 200 response with a `null` body, mirroring a bare single-row lookup.
#[get("/users/{cognitoId}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<User>>> {
    let cognito_id = path.into_inner();
    let user = state
        .users
        .find_by_cognito_id(&cognito_id)
        .await
        .map_err(map_persistence_error)?;
    Ok(web::Json(user))
}

/// Create a user. `profilePictureUrl` and `teamId` fall back to their
/// declared defaults when omitted.
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<NewUser>,
) -> ApiResult<HttpResponse> {
    let new_user = payload.into_inner().with_defaults();
    let user = state
        .users
        .create(new_user)
        .await
        .map_err(map_persistence_error)?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "User Created Successfully",
        "newUser": user,
    })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{InMemoryUserRepository, UserRepository};
    use crate::domain::{DEFAULT_PROFILE_PICTURE_URL, DEFAULT_TEAM_ID};
    use actix_web::{test as actix_test, App};
    use async_trait::async_trait;
    use rstest::rstest;
    use serde_json::Value;

    /// Repository stub whose every operation fails with a query error.
    struct FailingUserRepository;

    #[async_trait]
    impl UserRepository for FailingUserRepository {
        async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
            Err(UserPersistenceError::query("database unavailable"))
        }

        async fn find_by_cognito_id(
            &self,
            _cognito_id: &str,
        ) -> Result<Option<User>, UserPersistenceError> {
            Err(UserPersistenceError::query("database unavailable"))
        }

        async fn create(&self, _new_user: NewUser) -> Result<User, UserPersistenceError> {
            Err(UserPersistenceError::query("database unavailable"))
        }
    }

    fn test_app(
        repository: Arc<dyn UserRepository>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(HttpState::new(repository)))
            .service(list_users)
            .service(get_user)
            .service(create_user)
    }

    fn seeded_repository() -> Arc<InMemoryUserRepository> {
        Arc::new(InMemoryUserRepository::with_users(vec![
            User {
                user_id: 1,
                cognito_id: "cog-1".into(),
                username: "ada".into(),
                profile_picture_url: Some("i1.jpg".into()),
                team_id: Some(1),
            },
            User {
                user_id: 2,
                cognito_id: "cog-2".into(),
                username: "grace".into(),
                profile_picture_url: None,
                team_id: None,
            },
        ]))
    }

    #[actix_web::test]
    async fn list_users_returns_the_full_camel_case_array() {
        let app = actix_test::init_service(test_app(seeded_repository())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users").to_request(),
        )
        .await;
        assert!(response.status().is_success());

        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("JSON array");
        let users = value.as_array().expect("array");
        assert_eq!(users.len(), 2);
        assert_eq!(
            users[0].get("cognitoId").and_then(Value::as_str),
            Some("cog-1")
        );
        assert!(users[0].get("cognito_id").is_none());
    }

    #[actix_web::test]
    async fn get_user_fetches_by_cognito_id() {
        let app = actix_test::init_service(test_app(seeded_repository())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/users/cog-2")
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());

        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("JSON object");
        assert_eq!(value.get("username").and_then(Value::as_str), Some("grace"));
    }

    #[actix_web::test]
    async fn get_user_yields_null_for_unknown_ids() {
        let app = actix_test::init_service(test_app(seeded_repository())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/users/unknown")
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());

        let body = actix_test::read_body(response).await;
        assert_eq!(&body[..], &b"null"[..]);
    }

    #[actix_web::test]
    async fn create_user_fills_declared_defaults() {
        let app = actix_test::init_service(test_app(Arc::new(
            InMemoryUserRepository::default(),
        )))
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(serde_json::json!({
                    "username": "ada",
                    "cognitoId": "cog-9",
                }))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());

        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("JSON object");
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("User Created Successfully")
        );
        let new_user = value.get("newUser").expect("newUser present");
        assert_eq!(
            new_user.get("profilePictureUrl").and_then(Value::as_str),
            Some(DEFAULT_PROFILE_PICTURE_URL)
        );
        assert_eq!(
            new_user.get("teamId").and_then(Value::as_i64),
            Some(i64::from(DEFAULT_TEAM_ID))
        );
    }

    #[actix_web::test]
    async fn create_user_keeps_supplied_values() {
        let app = actix_test::init_service(test_app(Arc::new(
            InMemoryUserRepository::default(),
        )))
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(serde_json::json!({
                    "username": "ada",
                    "cognitoId": "cog-9",
                    "profilePictureUrl": "custom.png",
                    "teamId": 4,
                }))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());

        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("JSON object");
        let new_user = value.get("newUser").expect("newUser present");
        assert_eq!(
            new_user.get("profilePictureUrl").and_then(Value::as_str),
            Some("custom.png")
        );
        assert_eq!(new_user.get("teamId").and_then(Value::as_i64), Some(4));
    }

    #[rstest]
    #[case::list(actix_test::TestRequest::get().uri("/users"))]
    #[case::fetch(actix_test::TestRequest::get().uri("/users/cog-1"))]
    #[case::create(actix_test::TestRequest::post().uri("/users").set_json(serde_json::json!({
        "username": "ada",
        "cognitoId": "cog-9",
    })))]
    #[actix_web::test]
    async fn persistence_failures_yield_500_with_a_message(
        #[case] request: actix_test::TestRequest,
    ) {
        let app = actix_test::init_service(test_app(Arc::new(FailingUserRepository))).await;

        let response = actix_test::call_service(&app, request.to_request()).await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );

        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error body is JSON");
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .expect("message field");
        assert!(message.contains("database unavailable"));
    }
}
