//! Query engine over a directory's file entries.
//!
//! Enumerates the filenames in a folder, attaches per-file metadata, applies
//! an optional name transform, filters by regex predicates, orders by a
//! chosen field, and windows the result with offset/limit. A [`Repository`]
//! facade gives consumers a minimal read interface.

pub mod core;
pub mod utils;

pub use crate::core::{FileEntry, OrderDirection, OrderField, QueryEngine, QueryError, Repository};
