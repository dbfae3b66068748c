//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `commit`: Snapshot the working directory as a new commit
//! - `checkout`: Restore a commit and move HEAD to it
//! - `branch`: Create or list branches
//! - `tag`: Create tags
//! - `log`: Show commit history
//! - `status`: Show which branch or commit HEAD is on
//! - `reset`: Move the current branch to another commit

pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod reset;
pub mod status;
pub mod tag;
