use crate::areas::refs::RefValue;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{Error, Result};
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "master";

impl Repository {
    /// Create the metadata directory with an empty object database
    ///
    /// HEAD starts out attached to the default branch, which only comes into
    /// existence with the first commit.
    pub fn init(&self) -> Result<()> {
        let git_path = self.git_path();

        fs::create_dir(&git_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => Error::AlreadyInitialized(git_path.to_path_buf()),
            _ => Error::Io(e),
        })?;

        fs::create_dir_all(self.database().objects_path())?;
        fs::create_dir_all(self.refs().heads_path())?;
        fs::create_dir_all(self.refs().tags_path())?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs()
            .set_head(RefValue::Symbolic(default_branch.to_branch_ref()))?;

        writeln!(
            self.writer(),
            "Initialized empty ugit repository in {}",
            git_path.display()
        )?;

        Ok(())
    }
}
