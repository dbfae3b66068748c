//! Object types and operations
//!
//! Every piece of content is stored as an immutable object identified by the
//! SHA-1 digest of its framed bytes. There are three types:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (kind, object ID and name per entry)
//! - **Commit**: Snapshot reference with an optional parent and a message
//!
//! All objects share the on-disk framing `<type>\0<payload>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
