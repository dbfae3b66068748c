use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use tracing::debug;

impl Repository {
    /// Snapshot the working directory and advance HEAD to the new commit
    ///
    /// The current HEAD commit, if any, becomes the parent. When HEAD is
    /// attached, the branch it points at moves.
    pub fn commit(&self, message: &str) -> Result<ObjectId> {
        let tree_oid = self.write_tree()?;
        let parent = self.refs().read_head()?;

        let commit = Commit::new(tree_oid, parent, message.to_string());
        let commit_oid = self.database().store(&commit)?;
        self.refs().update_head(commit_oid.clone())?;

        debug!(commit = %commit_oid, parent = ?commit.parent(), "created commit");
        Ok(commit_oid)
    }

    pub fn get_commit(&self, oid: &ObjectId) -> Result<Commit> {
        self.database().parse_object_as_commit(oid)
    }

    /// Walk the ancestry of the given commits, each reachable commit once
    pub fn iter_commits_and_parents(
        &self,
        start_oids: impl IntoIterator<Item = Option<ObjectId>>,
    ) -> RevList<'_> {
        RevList::new(self.database(), start_oids)
    }
}
