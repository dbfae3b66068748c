//! Tree object
//!
//! Trees represent directory snapshots. They contain entries for files (blobs)
//! and subdirectories (other trees), each with its name and object ID.
//!
//! ## Format
//!
//! On disk: `tree\0<entries>`
//! Each entry is one line: `<kind> <oid> <name>\n`
//!
//! Entries are kept sorted by name, so hashing a tree does not depend on the
//! order in which the file system enumerated the directory.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Kind and target of a single tree entry; the name is the key in [`Tree`]
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub kind: ObjectType,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn is_tree(&self) -> bool {
        self.kind == ObjectType::Tree
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    /// Add an entry, rejecting illegal names, kinds and duplicates
    pub fn add_entry(&mut self, name: String, entry: TreeEntry) -> Result<()> {
        if !Self::is_valid_name(&name) {
            return Err(Error::MalformedTree(format!("illegal entry name {name:?}")));
        }

        if entry.kind == ObjectType::Commit {
            return Err(Error::MalformedTree(format!(
                "entry {name:?} has kind {}",
                entry.kind
            )));
        }

        if self.entries.contains_key(&name) {
            return Err(Error::MalformedTree(format!("duplicate entry name {name:?}")));
        }

        self.entries.insert(name, entry);
        Ok(())
    }

    /// A name is a single path segment: non-empty, no separator, not `.` or `..`
    ///
    /// Separators are the platform's, so `\` is a legal name character on
    /// Unix. Newlines and NUL never are, since entries are newline-terminated.
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name
                .chars()
                .any(|c| std::path::is_separator(c) || c == '\n' || c == '\0')
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TreeEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, TreeEntry)> {
        self.entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes> {
        let mut content = String::new();

        for (name, entry) in &self.entries {
            writeln!(content, "{} {} {}", entry.kind, entry.oid, name)
                .map_err(|e| Error::MalformedTree(e.to_string()))?;
        }

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Tree {
    fn deserialize(payload: Bytes) -> Result<Self> {
        let content = std::str::from_utf8(&payload)
            .map_err(|_| Error::MalformedTree("payload is not valid UTF-8".to_string()))?;
        let mut tree = Tree::default();

        for line in content.split_terminator('\n') {
            let mut parts = line.splitn(3, ' ');
            let (Some(kind), Some(oid), Some(name)) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(Error::MalformedTree(format!("bad entry line {line:?}")));
            };

            let kind = ObjectType::try_from(kind)?;
            let oid = ObjectId::try_parse(oid.to_string())
                .map_err(|_| Error::MalformedTree(format!("bad object id in {line:?}")))?;

            tree.add_entry(name.to_string(), TreeEntry::new(kind, oid))?;
        }

        Ok(tree)
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}
