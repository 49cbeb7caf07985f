//! Provides input functionality for atomistic structure files.
//!
//! Frames read here become [`SystemSnapshot`](crate::core::models::system::SystemSnapshot)
//! batches for the evaluator. The only format implemented is (extended) XYZ.

pub mod traits;
pub mod xyz;
