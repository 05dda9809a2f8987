//! # Campground Services
//!
//! This crate provides the campground and review records, the input schemas that
//! guard them, and the stores that persist them.

/// Records, form schemas and error types for campgrounds and reviews.
pub mod types;
/// Pure validation of submitted forms.
pub mod validation;
/// The persistence contract shared by every store implementation.
pub mod store;
/// PostgreSQL-backed store.
pub mod service;
/// In-process store used by tests and local experiments.
pub mod memory;

pub use memory::MemoryStore;
pub use service::PgCampgroundStore;
pub use store::{CampgroundStore, Lookup};
pub use types::*;
pub use validation::ValidationFailure;
