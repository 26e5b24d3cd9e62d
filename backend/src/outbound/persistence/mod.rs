//! PostgreSQL Record Store adapters.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types; the row structs and table definitions stay private to this module.
//! Connections come from a `bb8` pool of `diesel-async` connections.
//!
//! # Example
//!
//! ```ignore
//! use wardrobe::outbound::persistence::{DbPool, DieselProfileRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/wardrobe")).await?;
//! let profiles = DieselProfileRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_profile_repository;
mod diesel_wardrobe_item_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_wardrobe_item_repository::DieselWardrobeItemRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
