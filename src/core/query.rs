//! The query engine: enumerate → filter → dedupe → order → paginate.

use super::{FileEntry, OrderDirection, OrderField, QueryError};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maps a raw filename to the display/grouping key used for deduplication,
/// filtering, and lookup. Identity by default; consumers inject their own to
/// group files (strip extensions, normalize case) without touching the
/// pipeline.
pub type NameTransform = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Executes filtered, ordered, paginated queries over one directory.
///
/// Holds the query parameters only; every read operation re-scans the
/// directory from scratch, so results always reflect the live filesystem
/// state. Intended to be constructed per query context and discarded after
/// the result is read. Re-scanning per call is a known scalability limit for
/// large directories; caching would change the live-view semantics.
pub struct QueryEngine {
    path: PathBuf,
    order_field: Option<String>,
    direction: OrderDirection,
    offset: i64,
    limit: Option<i64>,
    filters: Vec<String>,
    transform: NameTransform,
}

impl QueryEngine {
    /// Creates an engine over `path` with the identity name transform.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_transform(path, Box::new(|filename| filename.to_string()))
    }

    /// Creates an engine over `path` with a custom name transform.
    pub fn with_transform(path: impl Into<PathBuf>, transform: NameTransform) -> Self {
        Self {
            path: path.into(),
            order_field: None,
            direction: OrderDirection::Asc,
            offset: 0,
            limit: None,
            filters: Vec::new(),
            transform,
        }
    }

    /// Appends a regex pattern to the filter sequence. An entry survives
    /// filtering only if every registered pattern matches its transformed
    /// name. The pattern is not validated here; a malformed one fails the
    /// query at evaluation time.
    pub fn add_filter(&mut self, pattern: impl Into<String>) {
        self.filters.push(pattern.into());
    }

    /// Sets the sort field and direction. `direction` tokens other than
    /// `ASC`/`DESC` (case-insensitive) silently normalize to ascending. The
    /// field is validated against the sortable schema when the query runs.
    pub fn add_order_field(&mut self, field: impl Into<String>, direction: &str) {
        self.order_field = Some(field.into());
        self.direction = OrderDirection::from_token(direction);
    }

    /// Sets how many entries to skip from the front of the ordered result.
    /// Negative values are clamped to zero at the slicing step.
    pub fn add_offset(&mut self, offset: i64) {
        self.offset = offset;
    }

    /// Sets the maximum number of entries to return. Negative values are
    /// clamped to zero (an empty window) at the slicing step.
    pub fn add_limit(&mut self, limit: i64) {
        self.limit = Some(limit);
    }

    /// Returns the filtered, deduplicated, ordered, paginated entries.
    ///
    /// Fails with [`QueryError::UnknownOrderField`] if an order field was set
    /// that names no `FileEntry` attribute. Without an order field the
    /// entries come back in enumeration order.
    pub fn get_all(&self) -> Result<Vec<FileEntry>, QueryError> {
        let mut files = self.scan()?;

        if let Some(field) = &self.order_field {
            let facet = OrderField::parse(field)
                .ok_or_else(|| QueryError::UnknownOrderField(field.clone()))?;
            sort_by_facet(&mut files, facet, self.direction);
        }

        Ok(window(files, self.offset, self.limit))
    }

    /// Returns the entry whose transformed name matches `name` exactly, or
    /// `None`. Evaluated against the unpaginated, unordered filtered set, so
    /// the ordering and window settings have no effect here.
    pub fn get_one_by_name(&self, name: &str) -> Result<Option<FileEntry>, QueryError> {
        let files = self.scan()?;
        Ok(files.into_iter().find(|entry| entry.name == name))
    }

    /// Returns the size of the filtered, deduplicated set, ignoring ordering
    /// and pagination.
    pub fn get_count(&self) -> Result<usize, QueryError> {
        Ok(self.scan()?.len())
    }

    /// Enumerates the directory and applies the transform, dedup, and
    /// filters. An unreadable directory yields an empty set rather than an
    /// error, so a misconfigured or transient path degrades gracefully.
    fn scan(&self) -> Result<Vec<FileEntry>, QueryError> {
        let patterns = self
            .filters
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        let read_dir = match fs::read_dir(&self.path) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                tracing::debug!("directory {} not readable: {}", self.path.display(), e);
                return Ok(Vec::new());
            }
        };

        let mut files = Vec::new();
        let mut seen = HashSet::new();

        for entry in read_dir.filter_map(Result::ok) {
            // The file may vanish between enumeration and stat; skip it.
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(_) => continue,
            };
            if !metadata.is_file() {
                continue;
            }

            let filename = entry.file_name().to_string_lossy().into_owned();
            let name = (self.transform)(&filename);

            // First enumerated entry per transformed name wins.
            if seen.contains(&name) {
                continue;
            }

            if !patterns.iter().all(|pattern| pattern.is_match(&name)) {
                continue;
            }

            seen.insert(name.clone());
            files.push(FileEntry {
                name,
                filename,
                size: metadata.len(),
                created_time: metadata
                    .created()
                    .map(epoch_secs)
                    .unwrap_or_else(|_| metadata.modified().map(epoch_secs).unwrap_or(0)),
                updated_time: metadata.modified().map(epoch_secs).unwrap_or(0),
            });
        }

        tracing::trace!(
            "scanned {}: {} entries after filters",
            self.path.display(),
            files.len()
        );

        Ok(files)
    }
}

fn epoch_secs(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(duration) => duration.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}

/// Single-key sort on the chosen facet, entries carried as satellite data.
/// `sort_by` is stable, so ties keep enumeration order.
fn sort_by_facet(files: &mut [FileEntry], facet: OrderField, direction: OrderDirection) {
    files.sort_by(|a, b| {
        let ordering = match facet {
            OrderField::Name => a.name.cmp(&b.name),
            OrderField::Filename => a.filename.cmp(&b.filename),
            OrderField::Size => a.size.cmp(&b.size),
            OrderField::CreatedTime => a.created_time.cmp(&b.created_time),
            OrderField::UpdatedTime => a.updated_time.cmp(&b.updated_time),
        };
        match direction {
            OrderDirection::Asc => ordering,
            OrderDirection::Desc => ordering.reverse(),
        }
    });
}

/// Applies the offset/limit window. Negative offset and limit clamp to zero;
/// a limit of zero yields an empty result, no limit keeps all remaining
/// entries.
fn window(files: Vec<FileEntry>, offset: i64, limit: Option<i64>) -> Vec<FileEntry> {
    let offset = offset.max(0) as usize;
    let mut windowed: Vec<FileEntry> = files.into_iter().skip(offset).collect();
    if let Some(limit) = limit {
        windowed.truncate(limit.max(0) as usize);
    }
    windowed
}
