//! Command implementations
//!
//! Two categories, following git's architecture:
//!
//! - `plumbing`: Low-level commands for direct object manipulation
//! - `porcelain`: User-facing commands for version control workflows
//!
//! Plumbing commands provide building blocks, while porcelain commands compose
//! them into higher-level operations.

pub mod plumbing;
pub mod porcelain;
