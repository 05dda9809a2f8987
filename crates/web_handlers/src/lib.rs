//! # Web Handlers for the YelpCamp Web Application
//!
//! This crate provides the route handlers, pages and error rendering for YelpCamp.

/// Campground CRUD handlers
mod campground_handlers;
pub use campground_handlers::*;

/// Review creation and deletion handlers
mod review_handlers;
pub use review_handlers::*;

/// Landing page, health probe and the unmatched-path fallback
mod page_handlers;
pub use page_handlers::*;

/// The centralized error stage
pub mod error;
pub use error::AppError;

/// Rewrites form POSTs into PUT and DELETE requests
pub mod method_override;
pub use method_override::MethodOverride;

/// Route table and extractor configuration
pub mod routes;
pub use routes::configure;

/// HTML pages
pub mod views;
