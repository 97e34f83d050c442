//! The extraction engine.
//!
//! Per candidate node the pipeline runs root resolution
//! ([`root::find_root`]) → template building ([`template::build`], which
//! recursively drives [`classify::classify`]) → key allocation → span-based
//! source rewriting, coordinated by [`rewrite::rewrite_source`].

pub mod classify;
pub mod edits;
pub mod rewrite;
pub mod root;
pub mod template;
pub mod used_keys;

pub use classify::{ClassifyError, Fragment, Param};
pub use rewrite::{RewriteOutcome, RewriteWarning, UnsupportedContext, WarningKind, rewrite_source};
pub use root::RootError;
