use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::SymRefName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use colored::{ColoredString, Colorize};
use std::collections::HashMap;
use std::io::Write;

impl Repository {
    /// Print the history starting at the resolved name (HEAD by default)
    ///
    /// Each commit is decorated with the refs pointing at it.
    pub fn log(&self, start: Option<&str>) -> Result<()> {
        let start_oid = self.resolve_name(start.unwrap_or("@"))?;
        let reverse_refs = self.refs().reverse_refs()?;

        for oid in self.iter_commits_and_parents([Some(start_oid)]) {
            let oid = oid?;
            let commit = self.get_commit(&oid)?;

            self.show_commit(&oid, &commit, &reverse_refs)?;
        }

        Ok(())
    }

    fn show_commit(
        &self,
        oid: &ObjectId,
        commit: &Commit,
        reverse_refs: &HashMap<ObjectId, Vec<SymRefName>>,
    ) -> Result<()> {
        let mut writer = self.writer();

        writeln!(
            writer,
            "{}{}",
            format!("commit {oid}").yellow(),
            Self::commit_decoration(reverse_refs.get(oid))
        )?;
        writeln!(writer)?;
        for message_line in commit.message().lines() {
            if message_line.trim().is_empty() {
                writeln!(writer)?;
            } else {
                writeln!(writer, "    {message_line}")?;
            }
        }
        writeln!(writer)?;

        Ok(())
    }

    fn commit_decoration(ref_names: Option<&Vec<SymRefName>>) -> String {
        match ref_names {
            Some(ref_names) if !ref_names.is_empty() => {
                let names = ref_names
                    .iter()
                    .map(|ref_name| Self::colored_ref_name(ref_name).to_string())
                    .collect::<Vec<_>>()
                    .join(", ");

                format!(" ({names})")
            }
            _ => String::new(),
        }
    }

    fn colored_ref_name(ref_name: &SymRefName) -> ColoredString {
        if ref_name.is_head() {
            ref_name.as_ref().cyan().bold()
        } else if ref_name.branch_name().is_some() {
            ref_name.as_ref().green().bold()
        } else {
            ref_name.as_ref().yellow().bold()
        }
    }
}
