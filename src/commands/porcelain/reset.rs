use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Move HEAD, or the branch it is attached to, to another commit
    ///
    /// The working directory is left untouched.
    pub fn reset(&self, name: &str) -> Result<ObjectId> {
        let oid = self.resolve_name(name)?;
        self.get_commit(&oid)?;

        self.refs().update_head(oid.clone())?;

        Ok(oid)
    }
}
