use crate::areas::repository::Repository;
use crate::errors::Result;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> Result<()> {
        match self.refs().current_branch()? {
            Some(branch) => writeln!(self.writer(), "On branch {}", branch.to_short_name())?,
            None => match self.refs().read_head()? {
                Some(oid) => writeln!(self.writer(), "HEAD detached at {}", oid.to_short_oid())?,
                None => writeln!(self.writer(), "HEAD points nowhere")?,
            },
        }

        Ok(())
    }
}
