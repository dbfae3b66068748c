use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::path::Path;

impl Repository {
    /// Store the contents of a file as a blob
    ///
    /// Relative paths are taken from the repository root.
    pub fn hash_object(&self, object_path: &Path) -> Result<ObjectId> {
        let object = Blob::new(self.workspace().read_file(object_path)?);

        self.database().store(&object)
    }
}
