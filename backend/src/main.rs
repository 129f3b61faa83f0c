//! HTTP entry point: wires settings, persistence, and the user controllers.

use std::io;

use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use backend::server::{self, Settings};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::from_env().map_err(io::Error::other)?;
    server::run(settings).await
}
