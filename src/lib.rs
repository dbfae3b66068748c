//! A minimal content-addressable object store and snapshot model
//!
//! - `areas`: object database, refs, working directory and the repository handle
//! - `artifacts`: object model, ref names, revision resolution and history traversal
//! - `commands`: the operations exposed to the command-line layer
//! - `errors`: the error type shared by every operation

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
