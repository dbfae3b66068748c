use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the private metadata directory at the repository root
pub const GIT_DIR_NAME: &str = ".ugit";

/// Handle on one repository
///
/// Every operation goes through a handle, so several repositories can be
/// used side by side in the same process.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Create a handle rooted at `path`, creating the directory if needed
    ///
    /// The metadata directory does not have to exist yet; see [`Repository::open`].
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }

        let path = path.canonicalize()?;
        let git_path = path.join(GIT_DIR_NAME);

        let database = Database::new(git_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(git_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
            refs,
        })
    }

    /// Create a handle on an already initialized repository
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let repository = Self::new(path, writer)?;

        if !repository.git_path().is_dir() {
            return Err(Error::NotARepository(repository.path().to_path_buf()));
        }

        Ok(repository)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> Box<Path> {
        self.path.join(GIT_DIR_NAME).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Resolve a ref name, alias or literal object ID to an object ID
    pub fn resolve_name(&self, name: &str) -> Result<ObjectId> {
        Revision::try_parse(name)?.resolve(self.refs())
    }
}
