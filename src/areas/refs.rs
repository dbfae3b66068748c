//! References (branches, HEAD, tags)
//!
//! References are human-readable names pointing into the object graph.
//! A reference holds either:
//! - Direct: an object ID
//! - Symbolic: the name of another reference (e.g., HEAD -> refs/heads/master)
//!
//! ## Reference Types
//!
//! - HEAD: the current branch (attached) or commit (detached)
//! - Branches: refs/heads/* pointing to branch tip commits
//! - Tags: refs/tags/* pointing to tagged commits
//!
//! ## File Format
//!
//! References are stored as text files containing either:
//! - A 40-character SHA-1 hash (direct reference)
//! - `ref: <path>` for symbolic references

use crate::artifacts::branch::branch_name::{BranchName, HEADS_PREFIX, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use derive_new::new;
use file_guard::Lock;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Value stored in a ref slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefValue {
    /// Symbolic reference pointing to another ref
    Symbolic(SymRefName),
    /// Direct object ID
    Direct(ObjectId),
}

impl RefValue {
    pub fn is_symbolic(&self) -> bool {
        matches!(self, RefValue::Symbolic(_))
    }

    pub fn oid(&self) -> Option<&ObjectId> {
        match self {
            RefValue::Direct(oid) => Some(oid),
            RefValue::Symbolic(_) => None,
        }
    }

    fn parse(content: &str) -> Result<Option<RefValue>> {
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            let target = SymRefName::new(symref_match[1].to_string());
            if !target.is_valid() {
                return Err(Error::InvalidRefName(target.to_string()));
            }

            Ok(Some(RefValue::Symbolic(target)))
        } else {
            Ok(Some(RefValue::Direct(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }

    fn serialize(&self) -> String {
        match self {
            RefValue::Symbolic(target) => format!("ref: {target}"),
            RefValue::Direct(oid) => oid.to_string(),
        }
    }
}

/// References manager
///
/// Reads and writes ref files under the metadata directory, following
/// symbolic indirection on request.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.ugit`)
    path: Box<Path>,
}

impl Refs {
    /// Write a ref
    ///
    /// With `deref`, symbolic refs starting at `name` are followed and the
    /// last ref of the chain is overwritten. Without it, `name` itself is
    /// overwritten, which is how a symbolic HEAD becomes detached.
    pub fn update_ref(&self, name: &SymRefName, value: RefValue, deref: bool) -> Result<()> {
        if let RefValue::Symbolic(target) = &value
            && !target.is_valid()
        {
            return Err(Error::InvalidRefName(target.to_string()));
        }

        let (target_name, _) = self.resolve_ref(name, deref)?;
        let path = self.ref_path(&target_name)?;

        debug!(name = %name, target = %target_name, value = %value.serialize(), "updating ref");
        self.update_ref_file(&path, value.serialize())
    }

    /// Read a ref
    ///
    /// With `deref`, symbolic refs are followed to the final value, which is
    /// `None` when any ref of the chain does not exist. Without it, the value
    /// stored at `name` is returned as-is.
    pub fn get_ref(&self, name: &SymRefName, deref: bool) -> Result<Option<RefValue>> {
        Ok(self.resolve_ref(name, deref)?.1)
    }

    /// List `HEAD` and every ref under `refs/` whose name starts with `prefix`
    ///
    /// Refs under `refs/` come in file-name order. Files whose content is
    /// neither an object ID nor a `ref:` line are skipped.
    pub fn iter_refs(
        &self,
        prefix: &str,
        deref: bool,
    ) -> Result<Vec<(SymRefName, Option<RefValue>)>> {
        std::iter::once(SymRefName::head())
            .chain(self.list_refs(&self.refs_path())?)
            .filter(|name| name.as_ref().starts_with(prefix))
            .filter_map(|name| match self.get_ref(&name, deref) {
                Ok(value) => Some(Ok((name, value))),
                Err(e @ (Error::InvalidObjectId(_) | Error::InvalidRefName(_))) => {
                    debug!(name = %name, error = %e, "skipping unparsable ref");
                    None
                }
                Err(e) => Some(Err(e)),
            })
            .collect()
    }

    /// Object ID behind HEAD, following symbolic refs
    pub fn read_head(&self) -> Result<Option<ObjectId>> {
        Ok(self
            .get_ref(&SymRefName::head(), true)?
            .and_then(|value| value.oid().cloned()))
    }

    /// Point HEAD (through any symbolic refs) at a new commit
    pub fn update_head(&self, oid: ObjectId) -> Result<()> {
        self.update_ref(&SymRefName::head(), RefValue::Direct(oid), true)
    }

    /// Overwrite HEAD itself with a symbolic or direct value
    pub fn set_head(&self, value: RefValue) -> Result<()> {
        self.update_ref(&SymRefName::head(), value, false)
    }

    /// The branch ref HEAD is attached to, or None when HEAD is detached
    pub fn current_branch(&self) -> Result<Option<SymRefName>> {
        match self.get_ref(&SymRefName::head(), false)? {
            Some(RefValue::Symbolic(target)) if target.branch_name().is_some() => Ok(Some(target)),
            _ => Ok(None),
        }
    }

    /// Whether `refs/heads/<name>` currently resolves to an object ID
    pub fn is_branch(&self, name: &str) -> Result<bool> {
        let branch_ref = SymRefName::new(format!("{HEADS_PREFIX}{name}"));
        if !branch_ref.is_valid() {
            return Ok(false);
        }

        Ok(self.get_ref(&branch_ref, true)?.is_some())
    }

    pub fn create_branch(&self, name: &BranchName, oid: ObjectId) -> Result<()> {
        self.update_ref(&name.to_branch_ref(), RefValue::Direct(oid), true)
    }

    pub fn create_tag(&self, name: &BranchName, oid: ObjectId) -> Result<()> {
        self.update_ref(&name.to_tag_ref(), RefValue::Direct(oid), true)
    }

    pub fn list_branches(&self) -> Result<Vec<SymRefName>> {
        self.list_refs(&self.heads_path())
    }

    /// Map every object ID to the refs resolving to it
    pub fn reverse_refs(&self) -> Result<HashMap<ObjectId, Vec<SymRefName>>> {
        Ok(self
            .iter_refs("", true)?
            .into_iter()
            .fold(HashMap::new(), |mut acc, (name, value)| {
                if let Some(RefValue::Direct(oid)) = value {
                    acc.entry(oid).or_insert_with(Vec::new).push(name);
                }
                acc
            }))
    }

    /// Follow a ref to the slot that holds its final value
    ///
    /// Returns the name of that slot and its value. Tracks visited names so
    /// a symbolic cycle fails instead of recursing forever.
    fn resolve_ref(
        &self,
        name: &SymRefName,
        deref: bool,
    ) -> Result<(SymRefName, Option<RefValue>)> {
        let mut visited = HashSet::new();
        let mut current = name.clone();

        loop {
            if !visited.insert(current.clone()) {
                return Err(Error::SymrefCycle(current.to_string()));
            }

            let value = self.read_ref_file(&self.ref_path(&current)?)?;

            match value {
                Some(RefValue::Symbolic(target)) if deref => current = target,
                value => return Ok((current, value)),
            }
        }
    }

    fn read_ref_file(&self, path: &Path) -> Result<Option<RefValue>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        RefValue::parse(&content)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: String) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // open the ref file as WRONLY and CREAT to write the value to it
        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn list_refs(&self, path: &Path) -> Result<Vec<SymRefName>> {
        WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry)),
                Ok(_) => None,
                Err(e) if e.io_error().map(|e| e.kind()) == Some(std::io::ErrorKind::NotFound) => {
                    None
                }
                Err(e) => Some(Err(Error::from(e))),
            })
            .map(|entry| {
                let entry = entry?;
                let relative_path = entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .map_err(|_| Error::InvalidPath(entry.path().to_path_buf()))?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");

                Ok(SymRefName::new(name))
            })
            .collect()
    }

    fn ref_path(&self, name: &SymRefName) -> Result<PathBuf> {
        if !name.is_valid() {
            return Err(Error::InvalidRefName(name.to_string()));
        }

        Ok(self.path.join(name.as_ref_path()))
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn tags_path(&self) -> Box<Path> {
        self.refs_path().join("tags").into_boxed_path()
    }
}
