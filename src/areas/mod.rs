//! Core repository components
//!
//! - `database`: Object database for storing blobs, trees, and commits
//! - `refs`: Reference management (branches, HEAD, tags)
//! - `repository`: The repository handle threaded through every operation
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod refs;
pub mod repository;
pub mod workspace;
