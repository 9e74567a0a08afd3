//! Tests for the store, code generator, and service layers
//!
//! These bypass HTTP and exercise the library types directly, including the
//! concurrency guarantees of the store.

use std::thread;
use tempfile::NamedTempFile;

use linkcut::codegen;
use linkcut::error::AppError;
use linkcut::service::LinkService;
use linkcut::store::{LinkStore, StoreError};

/// Helper to open a store backed by a temporary database file
fn setup_store() -> (LinkStore, NamedTempFile) {
    let temp_db = NamedTempFile::new().expect("Failed to create temp file");
    let store = LinkStore::open(temp_db.path().to_str().unwrap())
        .expect("Failed to initialize test database");
    (store, temp_db)
}

#[test]
fn test_try_create_assigns_fresh_record() {
    let (store, _temp_db) = setup_store();

    let link = store.try_create("fresh1", "https://example.com").unwrap();

    assert_eq!(link.code, "fresh1");
    assert_eq!(link.target, "https://example.com");
    assert_eq!(link.hit_count, 0);
    assert!(link.last_hit_at.is_none());
    assert!(!link.id.is_empty());
}

#[test]
fn test_try_create_rejects_taken_code() {
    let (store, _temp_db) = setup_store();

    store.try_create("taken1", "https://example.com/a").unwrap();
    let err = store
        .try_create("taken1", "https://example.com/b")
        .unwrap_err();

    assert!(matches!(err, StoreError::AlreadyExists));

    // The original record survived the failed insert untouched
    let link = store.find_by_code("taken1").unwrap().unwrap();
    assert_eq!(link.target, "https://example.com/a");
}

#[test]
fn test_record_hit_increments_and_touches() {
    let (store, _temp_db) = setup_store();

    store.try_create("hitme1", "https://example.com").unwrap();

    let first = store.record_hit("hitme1").unwrap();
    assert_eq!(first.hit_count, 1);
    let first_hit = first.last_hit_at.unwrap();

    let second = store.record_hit("hitme1").unwrap();
    assert_eq!(second.hit_count, 2);
    assert!(second.last_hit_at.unwrap() >= first_hit);
}

#[test]
fn test_record_hit_unknown_code() {
    let (store, _temp_db) = setup_store();

    let err = store.record_hit("nothere").unwrap_err();
    assert!(matches!(err, StoreError::NotFound));

    // A failed hit must not create a record
    assert!(store.find_by_code("nothere").unwrap().is_none());
}

#[test]
fn test_concurrent_hits_lose_no_increments() {
    let (store, _temp_db) = setup_store();

    store.try_create("parallel", "https://example.com").unwrap();

    const THREADS: usize = 8;
    const HITS_PER_THREAD: usize = 25;

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                for _ in 0..HITS_PER_THREAD {
                    store.record_hit("parallel").unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let link = store.find_by_code("parallel").unwrap().unwrap();
    assert_eq!(link.hit_count, (THREADS * HITS_PER_THREAD) as u64);
}

#[test]
fn test_delete_frees_code_for_reuse() {
    let (store, _temp_db) = setup_store();

    let first = store.try_create("cycle1", "https://example.com/old").unwrap();
    store.record_hit("cycle1").unwrap();
    store.delete("cycle1").unwrap();

    assert!(store.find_by_code("cycle1").unwrap().is_none());
    assert!(matches!(
        store.delete("cycle1").unwrap_err(),
        StoreError::NotFound
    ));

    // Re-creation under the same code is a new lifecycle
    let second = store.try_create("cycle1", "https://example.com/new").unwrap();
    assert_ne!(second.id, first.id);
    assert_eq!(second.hit_count, 0);
    assert!(second.last_hit_at.is_none());
}

#[test]
fn test_list_orders_newest_first() {
    let (store, _temp_db) = setup_store();

    for i in 1..=3 {
        store
            .try_create(&format!("listed{}", i), "https://example.com")
            .unwrap();
        thread::sleep(std::time::Duration::from_millis(2));
    }

    let links = store.list().unwrap();
    let codes: Vec<&str> = links.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["listed3", "listed2", "listed1"]);
}

#[test]
fn test_random_code_format() {
    for _ in 0..100 {
        let code = codegen::random_code();
        assert_eq!(code.len(), codegen::GENERATED_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}

#[test]
fn test_code_format_rule() {
    assert!(codegen::is_valid_code("Abc123"));
    assert!(codegen::is_valid_code("abcdefgh"));
    assert!(!codegen::is_valid_code("abc"));
    assert!(!codegen::is_valid_code("abcdefghi"));
    assert!(!codegen::is_valid_code("abc-12"));
    assert!(!codegen::is_valid_code(""));
    assert!(!codegen::is_valid_code("with sp"));
}

#[test]
fn test_generate_returns_available_code() {
    let (store, _temp_db) = setup_store();

    let code = codegen::generate(&store).unwrap();
    assert!(codegen::is_valid_code(&code));
    assert!(store.find_by_code(&code).unwrap().is_none());
}

#[test]
fn test_service_rejects_bad_targets() {
    let (store, _temp_db) = setup_store();
    let service = LinkService::new(store);

    for target in ["ftp://example.com", "example.com", "not a url", ""] {
        let err = service.create(target, None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "target: {target}");
    }
}

#[test]
fn test_service_rejects_bad_custom_codes() {
    let (store, _temp_db) = setup_store();
    let service = LinkService::new(store);

    for code in ["abc", "toolongcode1", "bad-01", "sp ace"] {
        let err = service
            .create("https://example.com", Some(code.to_string()))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "code: {code}");
    }
}

#[test]
fn test_service_treats_empty_code_as_absent() {
    let (store, _temp_db) = setup_store();
    let service = LinkService::new(store);

    let link = service
        .create("https://example.com", Some(String::new()))
        .unwrap();
    assert_eq!(link.code.len(), codegen::GENERATED_CODE_LEN);
}

#[test]
fn test_service_custom_code_conflict() {
    let (store, _temp_db) = setup_store();
    let service = LinkService::new(store);

    service
        .create("https://example.com/a", Some("mycode1".to_string()))
        .unwrap();
    let err = service
        .create("https://example.com/b", Some("mycode1".to_string()))
        .unwrap_err();

    // A taken custom code conflicts; it never falls back to generation
    assert!(matches!(err, AppError::CodeTaken));
}

#[test]
fn test_resolver_returns_target_and_records_hit() {
    let (store, _temp_db) = setup_store();
    let resolver = linkcut::redirect::Resolver::new(store.clone());

    store
        .try_create("visitme1", "https://example.com/dest")
        .unwrap();

    let target = resolver.resolve("visitme1").unwrap();
    assert_eq!(target, "https://example.com/dest");

    let link = store.find_by_code("visitme1").unwrap().unwrap();
    assert_eq!(link.hit_count, 1);
    assert!(link.last_hit_at.is_some());
}

#[test]
fn test_resolver_unknown_code() {
    let (store, _temp_db) = setup_store();
    let resolver = linkcut::redirect::Resolver::new(store);

    let err = resolver.resolve("unknown1").unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[test]
fn test_service_generated_codes_are_unique() {
    let (store, _temp_db) = setup_store();
    let service = LinkService::new(store);

    let mut codes = std::collections::HashSet::new();
    for _ in 0..50 {
        let link = service.create("https://example.com", None).unwrap();
        assert!(codegen::is_valid_code(&link.code));
        assert!(codes.insert(link.code), "duplicate generated code");
    }
}
