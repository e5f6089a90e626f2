//! # Lifecycle
//!
//! Starting, wiring, seeding and stopping the actors, plus tracing setup.

mod store_system;
pub mod tracing;

pub use store_system::{Seeded, SeedError, ShutdownError, StoreSystem};
