//! Project/task-management backend: relational schema access, ordered
//! fixture seeding, and pass-through user controllers.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod seed;
pub mod server;
