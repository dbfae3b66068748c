//! Object database
//!
//! Stores every object as a single file `objects/<oid>` holding the framed
//! bytes `<type>\0<payload>`. There is no cache: every call goes to disk.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{self, Object, TYPE_SEPARATOR, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, Result};
use bytes::Bytes;
use fake::rand;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store a typed object and return its ID
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        self.store_raw(object.object_type(), object.serialize()?)
    }

    /// Store a raw payload under the given type and return its ID
    ///
    /// Writing an object that already exists is a no-op: same bytes, same ID.
    pub fn store_raw(&self, object_type: ObjectType, payload: Bytes) -> Result<ObjectId> {
        let oid = object::hash_object(object_type, &payload)?;
        let object_path = self.path.join(oid.to_path());

        if object_path.exists() {
            debug!(%oid, %object_type, "object already stored");
            return Ok(oid);
        }

        self.write_object(&object_path, &object::frame(object_type, &payload))?;
        debug!(%oid, %object_type, size = payload.len(), "stored object");

        Ok(oid)
    }

    /// Load an object, split into its type and payload
    ///
    /// When `expected_type` is given, any other stored type is a [`Error::TypeMismatch`].
    pub fn load(
        &self,
        oid: &ObjectId,
        expected_type: Option<ObjectType>,
    ) -> Result<(ObjectType, Bytes)> {
        let object_path = self.path.join(oid.to_path());
        let content = match std::fs::read(&object_path) {
            Ok(content) => Bytes::from(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(oid.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let separator = content
            .iter()
            .position(|byte| *byte == TYPE_SEPARATOR)
            .ok_or_else(|| Error::CorruptObject {
                oid: oid.clone(),
                reason: "missing type separator".to_string(),
            })?;

        let object_type =
            ObjectType::parse_tag(&content[..separator]).ok_or_else(|| Error::CorruptObject {
                oid: oid.clone(),
                reason: format!(
                    "unknown type tag {:?}",
                    String::from_utf8_lossy(&content[..separator])
                ),
            })?;

        if let Some(expected) = expected_type
            && expected != object_type
        {
            return Err(Error::TypeMismatch {
                oid: oid.clone(),
                expected,
                actual: object_type,
            });
        }

        Ok((object_type, content.slice(separator + 1..)))
    }

    pub fn parse_object_as_blob(&self, oid: &ObjectId) -> Result<Blob> {
        let (_, payload) = self.load(oid, Some(ObjectType::Blob))?;
        Blob::deserialize(payload)
    }

    pub fn parse_object_as_tree(&self, oid: &ObjectId) -> Result<Tree> {
        let (_, payload) = self.load(oid, Some(ObjectType::Tree))?;
        Tree::deserialize(payload)
    }

    pub fn parse_object_as_commit(&self, oid: &ObjectId) -> Result<Commit> {
        let (_, payload) = self.load(oid, Some(ObjectType::Commit))?;
        Commit::deserialize(payload)
    }

    /// Expand a tree into a flat map from file path to blob ID
    ///
    /// Nested trees are expanded recursively, their entries prefixed with
    /// `base_path` joined with the subtree name.
    pub fn read_tree_flat(
        &self,
        oid: &ObjectId,
        base_path: &Path,
    ) -> Result<BTreeMap<PathBuf, ObjectId>> {
        let mut files = BTreeMap::new();
        self.collect_tree_files(oid, base_path, &mut files)?;

        Ok(files)
    }

    fn collect_tree_files(
        &self,
        oid: &ObjectId,
        base_path: &Path,
        files: &mut BTreeMap<PathBuf, ObjectId>,
    ) -> Result<()> {
        for (name, entry) in self.parse_object_as_tree(oid)?.into_entries() {
            let path = base_path.join(name);

            match entry.kind {
                ObjectType::Blob => {
                    files.insert(path, entry.oid);
                }
                ObjectType::Tree => self.collect_tree_files(&entry.oid, &path, files)?,
                ObjectType::Commit => {
                    return Err(Error::MalformedTree(format!(
                        "entry {} has kind {}",
                        path.display(),
                        entry.kind
                    )));
                }
            }
        }

        Ok(())
    }

    fn write_object(&self, object_path: &Path, content: &[u8]) -> Result<()> {
        let temp_object_path = self.path.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)?;
        file.write_all(content)?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path)?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
