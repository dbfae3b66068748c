//! Error types for repository operations.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the object database, refs and working-tree operations.
///
/// None of them are recovered from inside the crate; they abort the current
/// operation and surface to the caller as-is.
#[derive(Debug, Error)]
pub enum Error {
    /// No object is stored under the given id.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// The stored object has a different type than the caller required.
    #[error("object {oid} is a {actual}, expected a {expected}")]
    TypeMismatch {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },

    /// The stored bytes do not follow the `<type>\0<payload>` framing.
    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: ObjectId, reason: String },

    #[error("malformed tree: {0}")]
    MalformedTree(String),

    #[error("malformed commit: {0}")]
    MalformedCommit(String),

    /// The name matches no ref and is not a valid object id.
    #[error("unknown name: {0}")]
    UnknownName(String),

    #[error("repository already initialized in {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("not a ugit repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// A chain of symbolic refs loops back on itself.
    #[error("symbolic ref cycle detected at {0}")]
    SymrefCycle(String),

    #[error("invalid object id: {0:?}")]
    InvalidObjectId(String),

    #[error("invalid ref name: {0:?}")]
    InvalidRefName(String),

    /// A working-tree path cannot be represented inside a tree object.
    #[error("invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// Result alias for repository operations.
pub type Result<T> = std::result::Result<T, Error>;
