use super::*;
use crate::error::StoreError;
use crate::record::LinkStatus;
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

fn classified(pairs: &[(&str, LinkStatus)]) -> LinkStatuses {
    pairs
        .iter()
        .map(|(link, status)| (link.to_string(), *status))
        .collect()
}

fn open_store(dir: &TempDir) -> FileStore {
    FileStore::open(StoreConfig::with_dir(dir.path())).expect("failed to open store")
}

// =============================================================================
// Open / recovery
// =============================================================================

#[test]
fn test_open_fresh_directory_starts_at_zero() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = open_store(&dir);

    assert_eq!(store.last_id(), 0);
    assert!(dir.path().join("records.jsonl").exists());
    assert!(dir.path().join("pending.jsonl").exists());
}

#[test]
fn test_open_creates_missing_directory() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let nested = dir.path().join("a/b");
    let store = FileStore::open(StoreConfig::with_dir(&nested)).unwrap();

    assert_eq!(store.last_id(), 0);
    assert!(nested.join("records.jsonl").exists());
}

#[test]
fn test_recovery_reads_last_line_identifier() {
    let dir = TempDir::new().expect("failed to create temp dir");
    fs::write(
        dir.path().join("records.jsonl"),
        concat!(
            "{\"links\":{\"x\":\"not available\"},\"links_num\":6}\n",
            "{\"links\":{\"a\":\"available\"},\"links_num\":7}\n",
        ),
    )
    .unwrap();

    let store = open_store(&dir);
    assert_eq!(store.last_id(), 7);
}

#[test]
fn test_recovery_skips_torn_tail() {
    let dir = TempDir::new().expect("failed to create temp dir");
    // Crash mid-append: the final line is incomplete JSON.
    fs::write(
        dir.path().join("records.jsonl"),
        "{\"links\":{\"a\":\"available\"},\"links_num\":7}\n{\"links\":{\"b\":\"avail",
    )
    .unwrap();

    let store = open_store(&dir);
    assert_eq!(store.last_id(), 7);
}

#[test]
fn test_recovery_of_garbage_log_yields_zero() {
    let dir = TempDir::new().expect("failed to create temp dir");
    fs::write(dir.path().join("records.jsonl"), "not json at all\n").unwrap();

    let store = open_store(&dir);
    assert_eq!(store.last_id(), 0);
}

#[test]
fn test_identifiers_continue_across_reopen() {
    let dir = TempDir::new().expect("failed to create temp dir");
    {
        let store = open_store(&dir);
        store
            .append_record(classified(&[("a.com", LinkStatus::Available)]))
            .unwrap();
    }

    let store = open_store(&dir);
    let record = store
        .append_record(classified(&[("b.com", LinkStatus::NotAvailable)]))
        .unwrap();
    assert_eq!(record.id, 2);
}

// =============================================================================
// Primary log appends
// =============================================================================

#[test]
fn test_append_record_assigns_increasing_ids() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = open_store(&dir);

    let first = store
        .append_record(classified(&[("a.com", LinkStatus::Available)]))
        .unwrap();
    let second = store
        .append_record(classified(&[("b.com", LinkStatus::NotAvailable)]))
        .unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);

    let contents = fs::read_to_string(dir.path().join("records.jsonl")).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "{\"links\":{\"a.com\":\"available\"},\"links_num\":1}"
    );
}

#[test]
fn test_failed_append_rolls_back_identifier() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = open_store(&dir);

    let records_path = dir.path().join("records.jsonl");
    store
        .append_record(classified(&[("a.com", LinkStatus::Available)]))
        .unwrap();

    // Make the primary log unappendable by replacing it with a directory.
    fs::remove_file(&records_path).unwrap();
    fs::create_dir(&records_path).unwrap();

    let err = store.append_record(classified(&[("b.com", LinkStatus::Available)]));
    assert!(matches!(err, Err(StoreError::Io(_))));
    assert_eq!(store.last_id(), 1);

    fs::remove_dir(&records_path).unwrap();
    let record = store
        .append_record(classified(&[("b.com", LinkStatus::Available)]))
        .unwrap();
    assert_eq!(record.id, 2);
}

// =============================================================================
// Pending log
// =============================================================================

#[test]
fn test_pending_round_trip() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = open_store(&dir);

    let parked = store
        .append_pending(vec!["a.com".to_string(), "b.com".to_string()])
        .unwrap();
    assert_eq!(parked.id, 1);

    let entries = store.read_pending().unwrap();
    assert_eq!(entries, vec![parked]);
}

#[test]
fn test_pending_and_records_share_the_id_sequence() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = open_store(&dir);

    let record = store
        .append_record(classified(&[("a.com", LinkStatus::Available)]))
        .unwrap();
    let parked = store.append_pending(vec!["b.com".to_string()]).unwrap();

    assert_eq!(record.id, 1);
    assert_eq!(parked.id, 2);
}

#[test]
fn test_read_pending_skips_undecodable_lines() {
    let dir = TempDir::new().expect("failed to create temp dir");
    fs::write(
        dir.path().join("pending.jsonl"),
        concat!(
            "{\"links\":[\"a.com\"],\"links_num\":1}\n",
            "garbage\n",
            "{\"links\":[\"b.com\"],\"links_num\":2}\n",
            "{\"links\":[\"torn",
        ),
    )
    .unwrap();

    let store = open_store(&dir);
    let entries = store.read_pending().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].links, vec!["a.com"]);
    assert_eq!(entries[1].links, vec!["b.com"]);
}

#[test]
fn test_truncate_pending_clears_the_log() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = open_store(&dir);

    store.append_pending(vec!["a.com".to_string()]).unwrap();
    store.truncate_pending(&[]).unwrap();

    assert!(store.read_pending().unwrap().is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("pending.jsonl")).unwrap(),
        ""
    );
}

#[test]
fn test_truncate_pending_twice_is_a_noop() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = open_store(&dir);

    store.append_pending(vec!["a.com".to_string()]).unwrap();
    store.truncate_pending(&[]).unwrap();
    store.truncate_pending(&[]).unwrap();

    assert!(store.read_pending().unwrap().is_empty());
}

#[test]
fn test_truncate_pending_retains_kept_entries() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = open_store(&dir);

    store.append_pending(vec!["a.com".to_string()]).unwrap();
    let failed = store.append_pending(vec!["b.com".to_string()]).unwrap();

    store.truncate_pending(std::slice::from_ref(&failed)).unwrap();

    let entries = store.read_pending().unwrap();
    assert_eq!(entries, vec![failed]);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_appends_commit_in_id_order() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = std::sync::Arc::new(open_store(&dir));

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = std::sync::Arc::clone(&store);
        handles.push(std::thread::spawn(move || {
            for j in 0..20 {
                let link = format!("{}-{}.com", i, j);
                store
                    .append_record(classified(&[(link.as_str(), LinkStatus::Available)]))
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let contents = fs::read_to_string(dir.path().join("records.jsonl")).unwrap();
    let ids: Vec<i64> = contents
        .lines()
        .map(|line| serde_json::from_str::<Record>(line).unwrap().id)
        .collect();

    // Allocation happens under the file lock, so physical order is id order.
    assert_eq!(ids.len(), 160);
    assert!(ids.windows(2).all(|w| w[1] == w[0] + 1));

    let mut map = BTreeMap::new();
    map.insert("done".to_string(), LinkStatus::Available);
    assert_eq!(store.append_record(map).unwrap().id, 161);
}
