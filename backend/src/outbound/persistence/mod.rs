//! PostgreSQL persistence adapters using the Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL through `diesel-async` with `bb8` connection pooling.
//!
//! The adapters are thin: they translate between Diesel row structs
//! (`models.rs`) and domain types, and map database failures onto the
//! domain's persistence error enums. Schema definitions (`schema.rs`) and
//! row structs are internal to this module.

mod diesel_seed_store;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_seed_store::DieselSeedStore;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
