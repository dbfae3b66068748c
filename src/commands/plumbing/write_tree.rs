use crate::areas::repository::Repository;
use crate::areas::workspace::EntryKind;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use crate::errors::{Error, Result};
use std::path::Path;
use tracing::debug;

impl Repository {
    /// Snapshot the whole working directory and return the root tree ID
    pub fn write_tree(&self) -> Result<ObjectId> {
        self.write_tree_at(Path::new(""))
    }

    /// Snapshot a directory (relative to the root) into tree objects
    ///
    /// Stores one blob per file and one tree per directory, children first.
    /// Symbolic links and special files are skipped.
    pub fn write_tree_at(&self, dir_path: &Path) -> Result<ObjectId> {
        let mut tree = Tree::default();

        for (path, kind) in self.workspace().list_dir(dir_path)? {
            let name = path
                .file_name()
                .and_then(|name| name.to_str())
                .filter(|name| Tree::is_valid_name(name))
                .ok_or_else(|| Error::InvalidPath(path.clone()))?
                .to_string();

            let entry = match kind {
                EntryKind::File => {
                    let blob = Blob::new(self.workspace().read_file(&path)?);
                    TreeEntry::new(ObjectType::Blob, self.database().store(&blob)?)
                }
                EntryKind::Directory => {
                    TreeEntry::new(ObjectType::Tree, self.write_tree_at(&path)?)
                }
                EntryKind::Other => {
                    debug!(path = %path.display(), "skipping special file");
                    continue;
                }
            };

            tree.add_entry(name, entry)?;
        }

        self.database().store(&tree)
    }
}
