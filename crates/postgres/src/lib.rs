//! # Postgres
//!
//! This crate provides the connection pool and schema migrations for the YelpCamp database.

/// Connection pool, connectivity probe and migrations.
pub mod database;
