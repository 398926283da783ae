//! Repo address spec parsing.
//!
//! A spec is a short, human-typed address like `user/repo/subdir@ref` or
//! `user/repo#123`. This module turns one into a structured [`RepoSpec`];
//! nothing here touches the network.

mod parser;
mod reference;

pub use parser::{DEFAULT_BRANCH, RepoSpec};
pub use reference::RefKind;
