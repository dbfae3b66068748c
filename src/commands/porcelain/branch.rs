use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Create `refs/heads/<name>` at the resolved start point (HEAD by default)
    pub fn create_branch(&self, branch_name: &str, start_point: Option<&str>) -> Result<ObjectId> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let oid = self.resolve_name(start_point.unwrap_or("@"))?;

        self.refs().create_branch(&branch_name, oid.clone())?;

        Ok(oid)
    }

    /// Print every branch, marking the one HEAD is attached to
    pub fn list_branches(&self) -> Result<()> {
        let current = self.refs().current_branch()?;

        for branch in self.refs().list_branches()? {
            let name = branch.to_short_name();

            if current.as_ref() == Some(&branch) {
                writeln!(self.writer(), "* {}", name.green())?;
            } else {
                writeln!(self.writer(), "  {name}")?;
            }
        }

        Ok(())
    }
}
