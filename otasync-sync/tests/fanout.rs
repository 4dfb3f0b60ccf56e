//! Store-backed tests for the manifest reader, fan-out writer, pipeline,
//! and diff preview, run against an in-memory content store.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use serde_json::{json, Value};

use otasync_core::{artifact_path, AccessToken, SyncConfig};
use otasync_store::{ContentStore, RemoteFile, StoreError};
use otasync_sync::{diff_artifacts, manifest, pipeline, EntryOutcome, ManifestError, SyncError};

const MANIFEST_PATH: &str = "assets/upgrade.json";

#[derive(Debug, Clone)]
struct WriteCall {
    path: String,
    content: String,
    message: String,
    prior_sha: Option<String>,
}

/// In-memory stand-in for the GitHub contents store.
///
/// Reads report a synthetic sha per path; paths listed in `fail_reads` /
/// `fail_writes` answer with a 5xx status error.
#[derive(Default)]
struct MemStore {
    files: RefCell<BTreeMap<String, String>>,
    writes: RefCell<Vec<WriteCall>>,
    fail_reads: BTreeSet<String>,
    fail_writes: BTreeSet<String>,
}

impl MemStore {
    fn with_manifest(manifest: &Value) -> Self {
        let store = Self::default();
        store.insert(MANIFEST_PATH, &manifest.to_string());
        store
    }

    fn insert(&self, path: &str, content: &str) {
        self.files
            .borrow_mut()
            .insert(path.to_owned(), content.to_owned());
    }

    fn content(&self, path: &str) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    fn write_paths(&self) -> Vec<String> {
        self.writes.borrow().iter().map(|w| w.path.clone()).collect()
    }

    fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl ContentStore for MemStore {
    fn read(&self, path: &str) -> Result<Option<RemoteFile>, StoreError> {
        if self.fail_reads.contains(path) {
            return Err(StoreError::Status {
                path: path.to_owned(),
                status: 500,
            });
        }
        Ok(self.files.borrow().get(path).map(|content| RemoteFile {
            content: content.clone(),
            sha: Some(format!("sha-{path}")),
        }))
    }

    fn write(
        &self,
        path: &str,
        content: &str,
        message: &str,
        prior_sha: Option<&str>,
    ) -> Result<(), StoreError> {
        if self.fail_writes.contains(path) {
            return Err(StoreError::Status {
                path: path.to_owned(),
                status: 502,
            });
        }
        self.writes.borrow_mut().push(WriteCall {
            path: path.to_owned(),
            content: content.to_owned(),
            message: message.to_owned(),
            prior_sha: prior_sha.map(str::to_owned),
        });
        self.insert(path, content);
        Ok(())
    }
}

fn test_config() -> SyncConfig {
    SyncConfig {
        owner: "lunDreame".into(),
        repo: "lundreame.github.io".into(),
        branch: "main".into(),
        manifest_path: MANIFEST_PATH.into(),
        token: AccessToken::from("test-token"),
    }
}

/// Manifest with `n` firmware entries plus the trailing sentinel element.
fn manifest_with_entries(n: usize) -> Value {
    let mut elements: Vec<Value> = (0..n)
        .map(|i| json!({"version": format!("1.{i}"), "url": format!("http://fw/{i}")}))
        .collect();
    elements.push(json!({"count": n}));
    Value::Array(elements)
}

// ---------------------------------------------------------------------------
// Source Reader
// ---------------------------------------------------------------------------

#[test]
fn trim_drops_exactly_the_last_element_in_order() {
    let store = MemStore::with_manifest(&json!([
        {"version": "1.0"},
        {"version": "1.1"},
        {"version": "1.2"},
        {"sentinel": true}
    ]));

    let entries = manifest::fetch(&store, MANIFEST_PATH).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["version"], "1.0");
    assert_eq!(entries[1]["version"], "1.1");
    assert_eq!(entries[2]["version"], "1.2");
}

#[test]
fn single_element_manifest_trims_to_empty() {
    let store = MemStore::with_manifest(&json!([{"sentinel": true}]));
    let entries = manifest::fetch(&store, MANIFEST_PATH).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn missing_manifest_is_an_error() {
    let store = MemStore::default();
    let err = manifest::fetch(&store, MANIFEST_PATH).unwrap_err();
    assert!(matches!(err, ManifestError::Missing { .. }));
}

#[test]
fn empty_manifest_content_is_an_error() {
    let store = MemStore::default();
    store.insert(MANIFEST_PATH, "  \n");
    let err = manifest::fetch(&store, MANIFEST_PATH).unwrap_err();
    assert!(matches!(err, ManifestError::Empty { .. }));
}

#[test]
fn undecodable_manifest_is_an_error() {
    let store = MemStore::default();
    store.insert(MANIFEST_PATH, "not json at all");
    let err = manifest::fetch(&store, MANIFEST_PATH).unwrap_err();
    assert!(matches!(err, ManifestError::Parse { .. }));
}

#[test]
fn non_array_manifest_is_an_error() {
    let store = MemStore::default();
    store.insert(MANIFEST_PATH, r#"{"version": "1.0"}"#);
    let err = manifest::fetch(&store, MANIFEST_PATH).unwrap_err();
    assert!(matches!(err, ManifestError::NotAnArray { .. }));
}

// ---------------------------------------------------------------------------
// Pipeline — fan-out
// ---------------------------------------------------------------------------

#[test]
fn first_run_creates_missing_artifacts() {
    let store = MemStore::with_manifest(&manifest_with_entries(2));
    let summary = pipeline::run(&test_config(), &store, false).unwrap();

    assert_eq!(summary.outcomes.len(), 2);
    assert_eq!(summary.updated(), 2);
    assert_eq!(
        store.write_paths(),
        vec![artifact_path(0), artifact_path(1)]
    );

    let writes = store.writes.borrow();
    assert_eq!(writes[0].message, "Update self_mqttx/main0_firmware.json");
    assert_eq!(writes[0].prior_sha, None, "creation must not send a sha");
    assert_eq!(
        writes[0].content,
        "{\n    \"version\": \"1.0\",\n    \"url\": \"http://fw/0\"\n}"
    );
}

#[test]
fn second_run_is_idempotent() {
    let store = MemStore::with_manifest(&manifest_with_entries(3));

    let first = pipeline::run(&test_config(), &store, false).unwrap();
    assert_eq!(first.updated(), 3);
    let writes_after_first = store.write_count();

    let second = pipeline::run(&test_config(), &store, false).unwrap();
    assert_eq!(second.unchanged(), 3);
    assert_eq!(second.updated(), 0);
    assert_eq!(
        store.write_count(),
        writes_after_first,
        "second run must perform zero writes"
    );
}

#[test]
fn trailing_whitespace_does_not_trigger_a_write() {
    let store = MemStore::with_manifest(&json!([{"a": 1}, {"sentinel": true}]));
    store.insert(&artifact_path(0), "{\n    \"a\": 1\n}\n");

    let summary = pipeline::run(&test_config(), &store, false).unwrap();
    assert_eq!(summary.unchanged(), 1);
    assert_eq!(store.write_count(), 0);
}

#[test]
fn equal_json_with_different_text_still_triggers_a_write() {
    // Same parsed value, different canonical text: comparison is textual.
    let store = MemStore::with_manifest(&json!([{"a": 1}, {"sentinel": true}]));
    store.insert(&artifact_path(0), "{\"a\": 1}\n");

    let summary = pipeline::run(&test_config(), &store, false).unwrap();
    assert_eq!(summary.updated(), 1);
    assert_eq!(
        store.content(&artifact_path(0)).unwrap(),
        "{\n    \"a\": 1\n}"
    );
}

#[test]
fn update_threads_the_prior_sha() {
    let store = MemStore::with_manifest(&json!([{"a": 1}, {"sentinel": true}]));
    store.insert(&artifact_path(0), "stale content");

    pipeline::run(&test_config(), &store, false).unwrap();

    let writes = store.writes.borrow();
    assert_eq!(writes.len(), 1);
    assert_eq!(
        writes[0].prior_sha.as_deref(),
        Some("sha-self_mqttx/main0_firmware.json")
    );
}

#[test]
fn manifest_failure_short_circuits_all_writes() {
    let store = MemStore::default();
    store.insert(MANIFEST_PATH, "not json at all");

    let err = pipeline::run(&test_config(), &store, false).unwrap_err();
    assert!(matches!(err, SyncError::Manifest(_)));
    assert_eq!(store.write_count(), 0, "no fan-out without a manifest");
}

#[test]
fn entry_failure_does_not_stop_later_entries() {
    let mut store = MemStore::with_manifest(&manifest_with_entries(10));
    store.fail_writes.insert(artifact_path(3));

    let summary = pipeline::run(&test_config(), &store, false).unwrap();
    assert_eq!(summary.outcomes.len(), 10);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.updated(), 9);
    assert!(matches!(
        summary.outcomes[3],
        EntryOutcome::Failed { .. }
    ));

    let written = store.write_paths();
    for index in (0..10).filter(|&i| i != 3) {
        assert!(written.contains(&artifact_path(index)), "entry {index} skipped");
    }
    assert!(!written.contains(&artifact_path(3)));
}

#[test]
fn read_failure_is_entry_local() {
    let mut store = MemStore::with_manifest(&manifest_with_entries(2));
    store.fail_reads.insert(artifact_path(0));

    let summary = pipeline::run(&test_config(), &store, false).unwrap();
    assert!(matches!(summary.outcomes[0], EntryOutcome::Failed { .. }));
    assert!(matches!(summary.outcomes[1], EntryOutcome::Updated { .. }));
}

#[test]
fn dry_run_performs_no_writes() {
    let store = MemStore::with_manifest(&manifest_with_entries(2));

    let summary = pipeline::run(&test_config(), &store, true).unwrap();
    assert_eq!(summary.would_update(), 2);
    assert_eq!(store.write_count(), 0, "dry-run must not write");
    assert!(store.content(&artifact_path(0)).is_none());
}

#[test]
fn empty_trimmed_manifest_is_a_clean_run() {
    let store = MemStore::with_manifest(&json!([{"sentinel": true}]));

    let summary = pipeline::run(&test_config(), &store, false).unwrap();
    assert!(summary.outcomes.is_empty());
    assert_eq!(store.write_count(), 0);
}

// ---------------------------------------------------------------------------
// Diff preview
// ---------------------------------------------------------------------------

#[test]
fn diff_lists_only_changed_artifacts() {
    let store = MemStore::with_manifest(&manifest_with_entries(2));
    // Artifact 0 already matches; artifact 1 is stale.
    store.insert(
        &artifact_path(0),
        "{\n    \"version\": \"1.0\",\n    \"url\": \"http://fw/0\"\n}",
    );
    store.insert(&artifact_path(1), "{\n    \"version\": \"0.9\"\n}");

    let diffs = diff_artifacts(&test_config(), &store).unwrap();
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path, artifact_path(1));
    assert!(diffs[0]
        .unified_diff
        .contains("--- a/self_mqttx/main1_firmware.json"));
    assert!(diffs[0]
        .unified_diff
        .contains("+++ b/self_mqttx/main1_firmware.json"));
    assert!(diffs[0].unified_diff.contains("@@"));
    assert_eq!(store.write_count(), 0, "diff must not write");
}

#[test]
fn diff_of_synced_store_is_empty() {
    let store = MemStore::with_manifest(&manifest_with_entries(3));
    pipeline::run(&test_config(), &store, false).unwrap();

    let diffs = diff_artifacts(&test_config(), &store).unwrap();
    assert!(diffs.is_empty());
}

#[test]
fn diff_read_failure_names_the_artifact() {
    let mut store = MemStore::with_manifest(&manifest_with_entries(1));
    store.fail_reads.insert(artifact_path(0));

    let err = diff_artifacts(&test_config(), &store).unwrap_err();
    match err {
        SyncError::Artifact { path, .. } => assert_eq!(path, artifact_path(0)),
        other => panic!("unexpected error: {other}"),
    }
}
