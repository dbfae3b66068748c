//! Plumbing commands (low-level operations)
//!
//! ## Commands
//!
//! - `hash-object`: Store a file as a blob
//! - `cat-file`: Print the raw payload of an object
//! - `write-tree`: Snapshot the working directory into tree objects
//! - `read-tree`: Restore the working directory from a tree object

pub mod cat_file;
pub mod hash_object;
pub mod read_tree;
pub mod write_tree;
