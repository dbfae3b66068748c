use crate::areas::refs::RefValue;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{HEADS_PREFIX, SymRefName};
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use tracing::debug;

impl Repository {
    /// Restore the working directory to a commit and move HEAD there
    ///
    /// Checking out an existing branch by name attaches HEAD to it; anything
    /// else (a tag, a ref path, an object ID) leaves HEAD detached.
    pub fn checkout(&self, name: &str) -> Result<ObjectId> {
        let revision = Revision::try_parse(name)?;
        let oid = revision.resolve(self.refs())?;
        let commit = self.get_commit(&oid)?;

        self.read_tree(commit.tree_oid())?;

        let head = if self.refs().is_branch(revision.name())? {
            RefValue::Symbolic(SymRefName::new(format!(
                "{HEADS_PREFIX}{}",
                revision.name()
            )))
        } else {
            RefValue::Direct(oid.clone())
        };

        debug!(name, commit = %oid, attached = head.is_symbolic(), "checked out");
        self.refs().set_head(head)?;

        Ok(oid)
    }
}
