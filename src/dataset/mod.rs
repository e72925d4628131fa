//! Survey dataset loading.
//!
//! Reads the survey CSV into typed [`Response`](crate::models::Response)
//! rows, checking that every required column is present and dropping the
//! ones the report never shows.

pub mod loader;

pub use loader::Dataset;
