use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::{Error, Result};
use derive_new::new;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";
pub const REFS_PREFIX: &str = "refs/";
pub const HEADS_PREFIX: &str = "refs/heads/";
pub const TAGS_PREFIX: &str = "refs/tags/";

/// Full name of a ref slot, relative to the metadata directory
///
/// For example `HEAD`, `refs/heads/master` or `refs/tags/v1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, new)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn head() -> Self {
        Self(HEAD_REF_NAME.to_string())
    }

    pub fn is_head(&self) -> bool {
        self.0 == HEAD_REF_NAME
    }

    /// Whether this name may address a ref file
    ///
    /// Only `HEAD` and names under `refs/` qualify, and no path component
    /// may be empty, `.` or `..`.
    pub fn is_valid(&self) -> bool {
        if self.is_head() {
            return true;
        }

        self.0.starts_with(REFS_PREFIX)
            && self
                .0
                .split('/')
                .all(|part| !part.is_empty() && part != "." && part != "..")
    }

    pub fn as_ref_path(&self) -> &str {
        &self.0
    }

    /// The branch this ref names, if it lives under `refs/heads/`
    pub fn branch_name(&self) -> Option<&str> {
        self.0.strip_prefix(HEADS_PREFIX)
    }

    /// Name without the `refs/heads/` or `refs/tags/` prefix
    pub fn to_short_name(&self) -> &str {
        self.0
            .strip_prefix(HEADS_PREFIX)
            .or_else(|| self.0.strip_prefix(TAGS_PREFIX))
            .unwrap_or(&self.0)
    }
}

impl AsRef<str> for SymRefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymRefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated short name of a branch or tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidRefName(name));
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)?;

        if re.is_match(&name) {
            Err(Error::InvalidRefName(name))
        } else {
            Ok(Self(name))
        }
    }

    pub fn to_branch_ref(&self) -> SymRefName {
        SymRefName::new(format!("{HEADS_PREFIX}{}", self.0))
    }

    pub fn to_tag_ref(&self) -> SymRefName {
        SymRefName::new(format!("{TAGS_PREFIX}{}", self.0))
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
