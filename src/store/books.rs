use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, StoreError};
use crate::models::{Book, Statistics};

use super::file::{load_library, save_library};

/// The in-memory library plus the file it mirrors. Every mutating call writes
/// the whole collection back before returning, so after a successful call the
/// file and `books` hold the same sequence.
#[derive(Debug)]
pub struct BookStore {
    path: PathBuf,
    books: Vec<Book>,
}

impl BookStore {
    /// Make sure the parent directory exists, then load whatever the file
    /// currently holds.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let books = load_library(&path)?;
        info!(path = %path.display(), count = books.len(), "library opened");
        Ok(Self { path, books })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded collection in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Persist the current collection, replacing the file content.
    pub fn save(&self) -> Result<()> {
        save_library(&self.path, &self.books)
    }

    /// Append a book built from raw form values. `year` is parsed as an
    /// integer after trimming; a non-numeric year leaves the library as it
    /// was. Duplicates are accepted.
    pub fn add(
        &mut self,
        title: &str,
        author: &str,
        year: &str,
        genre: &str,
        read: bool,
    ) -> Result<&Book> {
        let year = parse_year(year)?;
        self.books.push(Book::new(title, author, year, genre, read));
        self.save()?;
        info!(title, author, year, "book added");

        let index = self.books.len() - 1;
        Ok(&self.books[index])
    }

    /// Delete the first book whose title equals `title`, ignoring case.
    /// Returns `false` (and writes nothing) when no title matches.
    pub fn remove(&mut self, title: &str) -> Result<bool> {
        let Some(index) = self.books.iter().position(|book| book.title_matches(title)) else {
            info!(title, "no book to remove");
            return Ok(false);
        };

        let removed = self.books.remove(index);
        self.save()?;
        info!(title = %removed.title, position = index, "book removed");
        Ok(true)
    }

    /// Books whose title or author contains `keyword`, ignoring case. An
    /// empty keyword matches every book.
    pub fn search(&self, keyword: &str) -> Vec<Book> {
        let keyword = keyword.to_lowercase();
        self.books
            .iter()
            .filter(|book| book.mentions(&keyword))
            .cloned()
            .collect()
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::from_books(&self.books)
    }
}

fn parse_year(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|source| StoreError::InvalidYear {
            input: raw.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn open_temp() -> (TempDir, BookStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = BookStore::open(dir.path().join("library.json")).unwrap();
        (dir, store)
    }

    fn add_plain(store: &mut BookStore, title: &str, author: &str, read: bool) {
        store.add(title, author, "2000", "Fiction", read).unwrap();
    }

    #[test]
    fn open_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("library.json");
        let store = BookStore::open(&path).unwrap();

        assert!(store.books().is_empty());
        assert!(path.parent().unwrap().is_dir());
        assert!(!path.exists());
    }

    #[test]
    fn add_appends_and_persists() {
        let (_dir, mut store) = open_temp();
        add_plain(&mut store, "Emma", "Jane Austen", false);
        let before = store.books().to_vec();

        let added = store
            .add("Dune", "Frank Herbert", " 1965 ", "Sci-Fi", true)
            .unwrap()
            .clone();
        assert_eq!(added, Book::new("Dune", "Frank Herbert", 1965, "Sci-Fi", true));

        assert_eq!(store.books().len(), before.len() + 1);
        assert_eq!(&store.books()[..before.len()], before.as_slice());
        assert_eq!(store.books().last(), Some(&added));
        assert_eq!(load_library(store.path()).unwrap(), store.books());
    }

    #[test]
    fn add_keeps_duplicates_and_blank_fields() {
        let (_dir, mut store) = open_temp();
        add_plain(&mut store, "Dune", "Frank Herbert", false);
        add_plain(&mut store, "Dune", "Frank Herbert", false);
        store.add("", "", "1999", "", false).unwrap();

        assert_eq!(store.books().len(), 3);
        assert_eq!(store.books()[2].title, "");
    }

    #[test]
    fn add_rejects_non_numeric_year_without_touching_state() {
        let (_dir, mut store) = open_temp();
        add_plain(&mut store, "Emma", "Jane Austen", false);
        let on_disk = fs::read(store.path()).unwrap();

        for year in ["nineteen", "", "19.5", "2000a"] {
            let err = store.add("Dune", "Frank Herbert", year, "", false).unwrap_err();
            assert!(matches!(err, StoreError::InvalidYear { .. }), "year: {year:?}");
        }

        assert_eq!(store.books().len(), 1);
        assert_eq!(fs::read(store.path()).unwrap(), on_disk);
    }

    #[test]
    fn add_accepts_years_outside_the_form_range() {
        let (_dir, mut store) = open_temp();
        store.add("Far Future", "Anon", "3000000000", "", false).unwrap();
        store.add("Antiquity", "Anon", "-800", "", true).unwrap();

        let years: Vec<_> = store.books().iter().map(|book| book.year).collect();
        assert_eq!(years, [3_000_000_000, -800]);
        assert_eq!(load_library(store.path()).unwrap(), store.books());
    }

    #[test]
    fn large_year_on_disk_survives_reopen_and_add() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        fs::write(
            &path,
            r#"[
                {"Title": "Dune", "Author": "Frank Herbert", "Year": 1965, "Genre": "Sci-Fi", "Read": true},
                {"Title": "Later", "Author": "Anon", "Year": 3000000000, "Genre": "", "Read": false}
            ]"#,
        )
        .unwrap();

        let mut store = BookStore::open(&path).unwrap();
        assert_eq!(store.books().len(), 2);
        assert_eq!(store.books()[1].year, 3_000_000_000);

        store.add("Emma", "Jane Austen", "1815", "Classic", false).unwrap();
        let titles: Vec<_> = load_library(&path)
            .unwrap()
            .into_iter()
            .map(|book| book.title)
            .collect();
        assert_eq!(titles, ["Dune", "Later", "Emma"]);
    }

    #[test]
    fn remove_deletes_only_first_case_insensitive_match() {
        let (_dir, mut store) = open_temp();
        add_plain(&mut store, "Dune", "First", false);
        add_plain(&mut store, "Dune", "Second", true);

        assert!(store.remove("dUNE").unwrap());
        assert_eq!(store.books().len(), 1);
        assert_eq!(store.books()[0].author, "Second");
        assert_eq!(load_library(store.path()).unwrap(), store.books());
    }

    #[test]
    fn remove_missing_title_changes_nothing() {
        let (_dir, mut store) = open_temp();
        add_plain(&mut store, "Dune", "Frank Herbert", false);
        let books = store.books().to_vec();
        let on_disk = fs::read(store.path()).unwrap();

        assert!(!store.remove("Nonexistent Title").unwrap());
        assert_eq!(store.books(), books.as_slice());
        assert_eq!(fs::read(store.path()).unwrap(), on_disk);
    }

    #[test]
    fn remove_requires_whole_title() {
        let (_dir, mut store) = open_temp();
        add_plain(&mut store, "Dune Messiah", "Frank Herbert", false);
        assert!(!store.remove("Dune").unwrap());
        assert_eq!(store.books().len(), 1);
    }

    #[test]
    fn search_matches_title_or_author_substring() {
        let (_dir, mut store) = open_temp();
        add_plain(&mut store, "Dune", "Frank Herbert", false);
        add_plain(&mut store, "Emma", "Jane Austen", true);

        let by_author = store.search("herb");
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].title, "Dune");

        let by_title = store.search("EMM");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].author, "Jane Austen");

        assert!(store.search("xyz").is_empty());
        assert_eq!(store.search("").len(), 2);
    }

    #[test]
    fn search_returns_matches_in_insertion_order() {
        let (_dir, mut store) = open_temp();
        add_plain(&mut store, "Zebra", "Ann", false);
        add_plain(&mut store, "Apple", "Anne", false);
        add_plain(&mut store, "Mango", "Bob", false);

        let titles: Vec<_> = store.search("ann").into_iter().map(|b| b.title).collect();
        assert_eq!(titles, ["Zebra", "Apple"]);
    }

    #[test]
    fn statistics_reports_percentage_read() {
        let (_dir, mut store) = open_temp();
        assert_eq!(store.statistics().total, 0);
        assert_eq!(store.statistics().percent_read, 0.0);

        add_plain(&mut store, "A", "a", true);
        add_plain(&mut store, "B", "b", false);
        add_plain(&mut store, "C", "c", false);
        add_plain(&mut store, "D", "d", false);

        let stats = store.statistics();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.percent_read, 25.0);
    }

    #[test]
    fn reopening_sees_previous_session() {
        let (dir, mut store) = open_temp();
        add_plain(&mut store, "Dune", "Frank Herbert", true);
        add_plain(&mut store, "Emma", "Jane Austen", false);
        let expected = store.books().to_vec();
        drop(store);

        let reopened = BookStore::open(dir.path().join("library.json")).unwrap();
        assert_eq!(reopened.books(), expected.as_slice());
    }
}
