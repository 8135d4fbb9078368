use std::fs;

use personal_library_manager::{load_library, save_library, Book, BookStore, StoreError};

fn open_store(dir: &tempfile::TempDir) -> BookStore {
    BookStore::open(dir.path().join("library.json")).unwrap()
}

#[test]
fn session_lifecycle_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    store.add("Dune", "Frank Herbert", "1965", "Sci-Fi", true).unwrap();
    store.add("Dune", "Imposter", "2020", "Parody", false).unwrap();
    store.add("Emma", "Jane Austen", "1815", "Classic", false).unwrap();
    store.add("Neuromancer", "William Gibson", "1984", "Cyberpunk", true).unwrap();

    assert!(store.remove("DUNE").unwrap());
    assert!(!store.remove("Nonexistent Title").unwrap());

    let reopened = open_store(&dir);
    let titles: Vec<_> = reopened.books().iter().map(|b| b.author.as_str()).collect();
    assert_eq!(titles, ["Imposter", "Jane Austen", "William Gibson"]);

    let stats = reopened.statistics();
    assert_eq!(stats.total, 3);
    assert!((stats.percent_read - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn persisted_document_is_an_array_of_pascal_case_objects() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    store.add("Dune", "Frank Herbert", "1965", "Sci-Fi", false).unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "Title": "Dune",
            "Author": "Frank Herbert",
            "Year": 1965,
            "Genre": "Sci-Fi",
            "Read": false
        }])
    );
}

#[test]
fn hand_written_document_is_loaded_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    fs::write(
        &path,
        r#"[
            {"Title": "B", "Author": "x", "Year": 2001, "Genre": "", "Read": true},
            {"Title": "A", "Author": "y", "Year": 1999, "Genre": "g", "Read": false}
        ]"#,
    )
    .unwrap();

    let books = load_library(&path).unwrap();
    assert_eq!(
        books,
        vec![
            Book::new("B", "x", 2001, "", true),
            Book::new("A", "y", 1999, "g", false),
        ]
    );
}

#[test]
fn corrupt_document_starts_empty_and_is_replaced_on_first_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    fs::write(&path, "{\"Title\": \"truncated").unwrap();

    let mut store = BookStore::open(&path).unwrap();
    assert!(store.books().is_empty());

    store.add("Emma", "Jane Austen", "1815", "Classic", true).unwrap();
    assert_eq!(load_library(&path).unwrap(), store.books());
}

#[test]
fn invalid_year_is_reported_to_the_caller() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    let err = store.add("Dune", "Frank Herbert", "soon", "", false).unwrap_err();
    assert!(matches!(err, StoreError::InvalidYear { ref input, .. } if input == "soon"));
    assert_eq!(err.to_string(), "Year must be a whole number, got \"soon\".");
    assert!(store.books().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn save_library_overwrites_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    let first = vec![
        Book::new("A", "a", 2000, "", false),
        Book::new("B", "b", 2000, "", false),
    ];
    save_library(&path, &first).unwrap();
    save_library(&path, &first[1..]).unwrap();

    assert_eq!(load_library(&path).unwrap(), &first[1..]);
}

#[test]
fn search_on_fresh_store_is_empty_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    assert!(store.search("").is_empty());
    assert!(store.search("anything").is_empty());
}
