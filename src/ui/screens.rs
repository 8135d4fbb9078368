use crate::models::Book;

use super::forms::{BookForm, LineInput};

/// Entries of the sidebar menu, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Page {
    AddBook,
    RemoveBook,
    SearchBooks,
    ViewLibrary,
    Statistics,
}

impl Page {
    pub(crate) const ALL: [Page; 5] = [
        Page::AddBook,
        Page::RemoveBook,
        Page::SearchBooks,
        Page::ViewLibrary,
        Page::Statistics,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Page::AddBook => "Add Book",
            Page::RemoveBook => "Remove Book",
            Page::SearchBooks => "Search Book",
            Page::ViewLibrary => "View Library",
            Page::Statistics => "Statistics",
        }
    }

    /// Heading shown above the page content.
    pub(crate) fn heading(self) -> &'static str {
        match self {
            Page::AddBook => "Add a New Book",
            Page::RemoveBook => "Remove a Book",
            Page::SearchBooks => "Search for a Book",
            Page::ViewLibrary => "Your Library",
            Page::Statistics => "Library Statistics",
        }
    }

    pub(crate) fn index(self) -> usize {
        Page::ALL.iter().position(|page| *page == self).unwrap_or(0)
    }

    /// Step through the menu without wrapping.
    pub(crate) fn offset(self, delta: isize) -> Page {
        let last = Page::ALL.len() as isize - 1;
        let index = (self.index() as isize + delta).clamp(0, last);
        Page::ALL[index as usize]
    }
}

/// Selection cursor over a list of books. Rendering lets ratatui keep the
/// cursor in view; this type only keeps it in bounds.
#[derive(Default)]
pub(crate) struct ListCursor {
    pub(crate) selected: usize,
}

impl ListCursor {
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let last = len as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

/// State of the search page: the keyword prompt plus the results of the
/// last submitted search. `results` stays `None` until the first search.
#[derive(Default)]
pub(crate) struct SearchScreen {
    pub(crate) input: LineInput,
    pub(crate) results: Option<Vec<Book>>,
    pub(crate) cursor: ListCursor,
}

impl SearchScreen {
    pub(crate) fn set_results(&mut self, results: Vec<Book>) {
        self.results = Some(results);
        self.cursor.select_first();
    }

    pub(crate) fn result_count(&self) -> usize {
        self.results.as_ref().map_or(0, Vec::len)
    }
}

/// Per-page state. Switching pages in the menu builds a fresh screen, so
/// half-typed input does not survive navigation.
pub(crate) enum Screen {
    AddBook(BookForm),
    RemoveBook(LineInput),
    SearchBooks(SearchScreen),
    ViewLibrary(ListCursor),
    Statistics,
}

impl Screen {
    pub(crate) fn for_page(page: Page) -> Self {
        match page {
            Page::AddBook => Screen::AddBook(BookForm::default()),
            Page::RemoveBook => Screen::RemoveBook(LineInput::default()),
            Page::SearchBooks => Screen::SearchBooks(SearchScreen::default()),
            Page::ViewLibrary => Screen::ViewLibrary(ListCursor::default()),
            Page::Statistics => Screen::Statistics,
        }
    }
}
