//! Unit tests for portfolio stores.
//!
//! Both backends run the same checks through the `PortfolioStore` trait.

use folioboard::persistence::{FileStore, MemoryStore, StoreError};
use folioboard::{Portfolio, PortfolioStore};
use serde_json::json;
use tempfile::tempdir;

fn portfolio(user_id: &str, title: &str, created_at: u64) -> Portfolio {
    let mut portfolio = Portfolio::new(user_id, title, json!({"blocks": []}));
    portfolio.created_at = created_at;
    portfolio.updated_at = created_at;
    portfolio
}

fn check_listing_order(store: &dyn PortfolioStore) {
    store.insert(portfolio("u1", "oldest", 100)).unwrap();
    store.insert(portfolio("u1", "newest", 300)).unwrap();
    store.insert(portfolio("u1", "middle", 200)).unwrap();
    store.insert(portfolio("u2", "other", 400)).unwrap();

    let titles: Vec<String> = store
        .list_by_owner("u1")
        .unwrap()
        .into_iter()
        .map(|portfolio| portfolio.title)
        .collect();
    assert_eq!(titles, ["newest", "middle", "oldest"]);
    assert_eq!(store.find_by_owner("u1").unwrap().unwrap().title, "newest");
    assert!(store.list_by_owner("nobody").unwrap().is_empty());
}

fn check_update(store: &dyn PortfolioStore) {
    let saved = store.insert(portfolio("u1", "Draft", 1)).unwrap();
    let mut changed = saved.clone();
    changed.title = "Final".to_string();
    changed.layout_json = json!({"blocks": null});

    store.update(changed.clone()).unwrap();
    assert_eq!(store.get(&saved.id).unwrap(), Some(changed));

    let ghost = portfolio("u1", "Ghost", 2);
    assert!(matches!(store.update(ghost), Err(StoreError::Missing(_))));
}

#[test]
fn test_memory_store_listing_order() {
    check_listing_order(&MemoryStore::new());
}

#[test]
fn test_memory_store_update() {
    check_update(&MemoryStore::new());
}

#[test]
fn test_file_store_listing_order() {
    let dir = tempdir().unwrap();
    check_listing_order(&FileStore::open(dir.path()).unwrap());
}

#[test]
fn test_file_store_update() {
    let dir = tempdir().unwrap();
    check_update(&FileStore::open(dir.path()).unwrap());
}

#[test]
fn test_file_store_one_file_per_portfolio() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    let saved = store.insert(portfolio("u1", "Mine", 1)).unwrap();
    store.update(saved.clone()).unwrap();

    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files, [format!("{}.json", saved.id)]);
}

#[test]
fn test_file_store_ignores_foreign_files() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a portfolio").unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    store.insert(portfolio("u1", "Mine", 1)).unwrap();

    assert_eq!(store.list_by_owner("u1").unwrap().len(), 1);
}
