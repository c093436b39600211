//! Integration tests for the dirquery engine and repository facade.
//!
//! These run against real directories created with `tempfile`, so they cover
//! the full enumerate → filter → dedupe → order → paginate pipeline including
//! the metadata reads.

use dirquery::utils::test_helpers::setup_test_logging;
use dirquery::{QueryEngine, Repository};
use std::path::PathBuf;
use std::time::UNIX_EPOCH;
use tempfile::TempDir;

/// Contains the test infrastructure.
mod helpers {
    use super::*;
    use std::fs;

    /// `TestHarness` sets up an isolated directory for each test case.
    pub struct TestHarness {
        pub root_path: PathBuf,
        _temp_dir: TempDir,
    }

    impl TestHarness {
        pub fn new() -> Self {
            let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
            let root_path = temp_dir.path().to_path_buf();
            Self {
                root_path,
                _temp_dir: temp_dir,
            }
        }

        /// Creates a file inside the temporary test directory.
        pub fn create_file(&self, path: &str, content: &str) {
            let file_path = self.root_path.join(path);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent dir");
            }
            fs::write(file_path, content).expect("Failed to write file");
        }

        /// Sets up a small document folder for testing.
        pub fn setup_documents(&self) {
            self.create_file("invoice-01.pdf", "ten bytes.");
            self.create_file("invoice-02.pdf", "twenty bytes exactly");
            self.create_file("readme.txt", "hello");
        }
    }
}

#[test]
fn entry_metadata_matches_filesystem_ground_truth() {
    setup_test_logging();
    let harness = helpers::TestHarness::new();
    harness.create_file("data.bin", "12345678901"); // 11 bytes

    let engine = QueryEngine::new(&harness.root_path);
    let entry = engine
        .get_one_by_name("data.bin")
        .expect("query failed")
        .expect("entry not found");

    let metadata = std::fs::metadata(harness.root_path.join("data.bin")).unwrap();
    let modified_secs = metadata
        .modified()
        .unwrap()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    assert_eq!(entry.filename, "data.bin");
    assert_eq!(entry.name, "data.bin", "identity transform by default");
    assert_eq!(entry.size, 11);
    assert_eq!(entry.updated_time, modified_secs);
    // Creation time is platform-dependent but never after the modification
    // of a freshly written file (beyond clock resolution).
    assert!(entry.created_time <= entry.updated_time + 1);
    assert!(entry.created_time > 0);
}

#[test]
fn repository_passes_queries_through_to_the_engine() {
    setup_test_logging();
    let harness = helpers::TestHarness::new();
    harness.setup_documents();

    let mut repository = Repository::new(QueryEngine::new(&harness.root_path));
    repository.engine_mut().add_filter(r"\.pdf$");
    repository.engine_mut().add_order_field("size", "DESC");

    let entries = repository.get_all().expect("query failed");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].filename, "invoice-02.pdf");
    assert_eq!(entries[1].filename, "invoice-01.pdf");

    let one = repository.get_one_by_name("readme.txt").expect("query failed");
    assert_eq!(one.unwrap().size, 5);
    assert!(repository.get_one_by_name("missing").unwrap().is_none());
}

#[test]
fn page_windowing_matches_the_caller_contract() {
    setup_test_logging();
    let harness = helpers::TestHarness::new();
    for i in 0..7 {
        harness.create_file(&format!("doc-{}.txt", i), "x");
    }

    // The caller converts a 1-based page and page size into offset/limit.
    let (page, per_page): (i64, i64) = (2, 3);
    let mut repository = Repository::new(QueryEngine::new(&harness.root_path));
    repository.engine_mut().add_order_field("name", "ASC");
    repository.engine_mut().add_offset(per_page * (page - 1));
    repository.engine_mut().add_limit(per_page);

    let entries = repository.get_all().expect("query failed");
    let filenames: Vec<&str> = entries.iter().map(|e| e.filename.as_str()).collect();
    assert_eq!(filenames, vec!["doc-3.txt", "doc-4.txt", "doc-5.txt"]);
}

#[test]
fn every_call_rescans_the_live_directory() {
    setup_test_logging();
    let harness = helpers::TestHarness::new();
    harness.create_file("first.txt", "a");

    let engine = QueryEngine::new(&harness.root_path);
    assert_eq!(engine.get_count().unwrap(), 1);

    // A file created after construction shows up on the next read.
    harness.create_file("second.txt", "b");
    assert_eq!(engine.get_count().unwrap(), 2);
    assert!(engine.get_one_by_name("second.txt").unwrap().is_some());
}

#[test]
fn nested_files_are_not_part_of_the_listing() {
    setup_test_logging();
    let harness = helpers::TestHarness::new();
    harness.create_file("top.txt", "a");
    harness.create_file("nested/inner.txt", "b");

    let engine = QueryEngine::new(&harness.root_path);
    let entries = engine.get_all().expect("query failed");

    // Only the directory's own regular files; the subdirectory itself and
    // its contents are excluded.
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].filename, "top.txt");
}
