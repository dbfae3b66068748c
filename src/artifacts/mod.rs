//! Data structures and algorithms
//!
//! - `branch`: Ref names and revision resolution
//! - `log`: Commit history traversal
//! - `objects`: Object types (blob, tree, commit) and their encodings

pub mod branch;
pub mod log;
pub mod objects;
