use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Create `refs/tags/<name>` at the resolved target (HEAD by default)
    ///
    /// The target is not checked to be a commit or even to exist.
    pub fn create_tag(&self, name: &str, target: Option<&str>) -> Result<ObjectId> {
        let tag_name = BranchName::try_parse(name.to_string())?;
        let oid = self.resolve_name(target.unwrap_or("@"))?;

        self.refs().create_tag(&tag_name, oid.clone())?;

        Ok(oid)
    }
}
