//! A repository facade over the query engine.

use super::{FileEntry, QueryEngine, QueryError};

/// Retrieves the file entries for a given path through an owned
/// [`QueryEngine`].
///
/// Pure pass-through with no logic of its own; it exists so consumers (e.g.
/// a table/grid adapter) depend on a minimal read interface instead of the
/// engine's construction details. Callers configure the engine through
/// [`engine_mut`](Self::engine_mut) before reading.
pub struct Repository {
    engine: QueryEngine,
}

impl Repository {
    pub fn new(engine: QueryEngine) -> Self {
        Self { engine }
    }

    /// Gets all file entries, with the engine's filters, ordering, and
    /// pagination applied.
    pub fn get_all(&self) -> Result<Vec<FileEntry>, QueryError> {
        self.engine.get_all()
    }

    /// Gets only the file entry matching the transformed name provided.
    pub fn get_one_by_name(&self, name: &str) -> Result<Option<FileEntry>, QueryError> {
        self.engine.get_one_by_name(name)
    }

    /// Mutable access to the owned engine, for applying ordering, pagination,
    /// and filter changes.
    pub fn engine_mut(&mut self) -> &mut QueryEngine {
        &mut self.engine
    }
}
