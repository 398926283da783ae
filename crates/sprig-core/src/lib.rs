//! Sprig Core Library
//!
//! Resolves concise, human-typed repository addresses such as
//! `user/repo/subdir@ref`, `user/repo#123`, and `user/repo@*release`
//! into fully-specified, fetchable descriptors.

pub mod error;
pub mod resolve;
pub mod spec;

pub use error::{Error, Result};

/// Re-exports of commonly used types
pub mod prelude {
    // Errors
    pub use crate::error::{Error, Result};

    // Resolution
    pub use crate::resolve::{
        DEFAULT_HOST, DescriptorMetadata, GitHubApi, RemoteQuery, RemoteQueryError,
        ResolveDefaults, ResolvedDescriptor, ResolvedRef, assemble, resolve_reference,
        resolve_spec, resolve_specs,
    };

    // Spec grammar
    pub use crate::spec::{DEFAULT_BRANCH, RefKind, RepoSpec};
}
