//! Commit history traversal
//!
//! - `rev_list`: lazy walk over commit ancestry from one or more starting points

pub mod rev_list;
