//! HTTP server assembly and bootstrap.

pub mod config;

pub use config::{Settings, SettingsError};

use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::{info, warn};

use crate::domain::ports::InMemoryUserRepository;
use crate::inbound::http::{users, HttpState};
use crate::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};

/// Build the handler state, preferring PostgreSQL when configured.
///
/// Without `DATABASE_URL` the server still comes up, backed by an in-memory
/// user repository, so the HTTP surface can be exercised locally.
///
/// # Errors
///
/// Returns an error when the connection pool cannot be built.
pub async fn build_state(settings: &Settings) -> io::Result<HttpState> {
    match settings.database_url.as_deref() {
        Some(url) => {
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(io::Error::other)?;
            Ok(HttpState::new(Arc::new(DieselUserRepository::new(pool))))
        }
        None => {
            warn!("DATABASE_URL is not set; serving from an in-memory user repository");
            Ok(HttpState::new(Arc::new(InMemoryUserRepository::default())))
        }
    }
}

/// Serve the user controllers until shutdown.
///
/// # Errors
///
/// Returns an error when the state cannot be built or the listen address
/// cannot be bound.
pub async fn run(settings: Settings) -> io::Result<()> {
    let state = build_state(&settings).await?;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .service(users::list_users)
            .service(users::get_user)
            .service(users::create_user)
    })
    .bind(settings.bind_addr)?;

    info!(addr = %settings.bind_addr, "http server listening");
    server.run().await
}
