pub mod error;
pub mod query;
pub mod repository;

use serde::{Deserialize, Serialize};

/// One record per distinct transformed filename in the queried directory.
///
/// `name` is the dedup/lookup key: the result of the engine's name transform
/// applied to the raw filename. Within one query execution it is unique; the
/// first enumerated entry producing a given `name` wins and later duplicates
/// are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    /// The raw filename as read from the filesystem (lossy UTF-8).
    pub filename: String,
    /// Byte size at read time.
    pub size: u64,
    /// Creation time in seconds since the Unix epoch. Falls back to the
    /// modification time on filesystems that report no creation time.
    pub created_time: i64,
    /// Modification time in seconds since the Unix epoch.
    pub updated_time: i64,
}

/// The fixed schema of sortable entry fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Name,
    Filename,
    Size,
    CreatedTime,
    UpdatedTime,
}

impl OrderField {
    /// Resolves a caller-supplied field name. The snake_case spellings match
    /// the `FileEntry` fields; the camelCase forms are accepted because the
    /// consuming table layer addresses columns by those ids.
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "name" => Some(Self::Name),
            "filename" => Some(Self::Filename),
            "size" => Some(Self::Size),
            "created_time" | "createdTime" => Some(Self::CreatedTime),
            "updated_time" | "updatedTime" => Some(Self::UpdatedTime),
            _ => None,
        }
    }
}

/// Sort direction for [`QueryEngine::add_order_field`](query::QueryEngine::add_order_field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    /// Normalizes a direction token. `ASC`/`DESC` are matched
    /// case-insensitively; any other token falls back to ascending.
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("DESC") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

pub use error::QueryError;
pub use query::QueryEngine;
pub use repository::Repository;
