//! Commit object
//!
//! Commits represent snapshots of the working directory at specific points in
//! history. They contain:
//! - A tree object ID (directory snapshot)
//! - An optional parent commit ID (absent only for the first commit)
//! - A free-form message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit\0tree <tree-sha>
//! parent <parent-sha>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;

/// Commit object
///
/// History is linear: a commit has at most one parent.
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Commit {
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Parent commit ID (None for the first commit of a lineage)
    parent: Option<ObjectId>,
    /// Commit message, stored verbatim
    message: String,
}

impl Commit {
    /// Get the first line of the commit message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Result<Bytes> {
        let mut lines = vec![format!("tree {}", self.tree_oid)];
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        Ok(Bytes::from(lines.join("\n")))
    }
}

impl Unpackable for Commit {
    fn deserialize(payload: Bytes) -> Result<Self> {
        let content = std::str::from_utf8(&payload)
            .map_err(|_| Error::MalformedCommit("payload is not valid UTF-8".to_string()))?;

        let mut tree_oid = None;
        let mut parent = None;
        let mut rest = content;

        // headers run up to the first empty line, the message is everything after it
        loop {
            let (line, tail) = rest.split_once('\n').unwrap_or((rest, ""));
            rest = tail;

            if line.is_empty() {
                break;
            }

            let (key, value) = line
                .split_once(' ')
                .ok_or_else(|| Error::MalformedCommit(format!("bad header line {line:?}")))?;
            let slot = match key {
                "tree" => &mut tree_oid,
                "parent" => &mut parent,
                _ => {
                    return Err(Error::MalformedCommit(format!("unknown header {key:?}")));
                }
            };
            let oid = ObjectId::try_parse(value.to_string())
                .map_err(|_| Error::MalformedCommit(format!("bad object id in {line:?}")))?;

            if slot.replace(oid).is_some() {
                return Err(Error::MalformedCommit(format!("duplicate header {key:?}")));
            }
        }

        let tree_oid =
            tree_oid.ok_or_else(|| Error::MalformedCommit("missing tree header".to_string()))?;

        Ok(Self::new(tree_oid, parent, rest.to_string()))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
