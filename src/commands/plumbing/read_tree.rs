use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::path::Path;
use tracing::debug;

impl Repository {
    /// Replace the working directory contents with a tree
    ///
    /// The tree is expanded before anything is touched, so an unreadable tree
    /// leaves the working directory as it was. Files not in the tree are
    /// removed; directories are kept.
    pub fn read_tree(&self, tree_oid: &ObjectId) -> Result<()> {
        let files = self.database().read_tree_flat(tree_oid, Path::new(""))?;

        self.workspace().empty()?;

        for (path, blob_oid) in files {
            let blob = self.database().parse_object_as_blob(&blob_oid)?;
            self.workspace().write_file(&path, blob.content())?;
        }

        debug!(tree = %tree_oid, "materialized tree");
        Ok(())
    }
}
