use crate::areas::refs::Refs;
use crate::artifacts::branch::REF_ALIASES;
use crate::artifacts::branch::branch_name::{HEADS_PREFIX, REFS_PREFIX, SymRefName, TAGS_PREFIX};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};

/// A name the user supplied to identify a commit
///
/// Supports:
/// - Ref names: `HEAD`, `refs/heads/master`, `heads/master`, `v1`, `master`
/// - Aliases: `@` (resolves to `HEAD`)
/// - Full OIDs: 40-character hexadecimal strings (used as a fallback when no
///   ref matches; their existence is not checked here)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    name: String,
}

impl Revision {
    pub fn try_parse(revision: &str) -> Result<Revision> {
        if revision.is_empty() {
            return Err(Error::UnknownName(revision.to_string()));
        }

        let name = REF_ALIASES.get(revision).copied().unwrap_or(revision);

        Ok(Revision {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ref paths tried in order: the name itself, then under `refs/`,
    /// `refs/tags/` and `refs/heads/`
    pub fn candidates(&self) -> [SymRefName; 4] {
        [
            SymRefName::new(self.name.clone()),
            SymRefName::new(format!("{REFS_PREFIX}{}", self.name)),
            SymRefName::new(format!("{TAGS_PREFIX}{}", self.name)),
            SymRefName::new(format!("{HEADS_PREFIX}{}", self.name)),
        ]
    }

    pub fn resolve(&self, refs: &Refs) -> Result<ObjectId> {
        for candidate in self.candidates() {
            if !candidate.is_valid() {
                continue;
            }

            if let Some(oid) = refs
                .get_ref(&candidate, true)?
                .and_then(|value| value.oid().cloned())
            {
                return Ok(oid);
            }
        }

        if ObjectId::is_valid(&self.name) {
            return ObjectId::try_parse(self.name.clone());
        }

        Err(Error::UnknownName(self.name.clone()))
    }
}
