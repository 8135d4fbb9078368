use anyhow::Error;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::ListItem;

use crate::models::Book;

/// One listing row: bold title followed by author, year, genre and status.
pub(crate) fn book_line(book: &Book) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            book.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(book.details()),
    ])
}

pub(crate) fn book_items(books: &[Book]) -> Vec<ListItem<'static>> {
    books.iter().map(|book| ListItem::new(book_line(book))).collect()
}

/// Terminal cell just past `value` typed after `prefix` on `row` of `area`.
/// Widths are display widths, and the result never leaves `area`, so long or
/// wide input parks the cursor on the last column.
pub(crate) fn input_cursor(area: Rect, row: usize, prefix: &str, value: &str) -> Option<(u16, u16)> {
    if area.is_empty() {
        return None;
    }
    let offset = Span::raw(prefix).width().saturating_add(Span::raw(value).width());
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    let row = u16::try_from(row).unwrap_or(u16::MAX);

    let x = area.x.saturating_add(offset).min(area.right() - 1);
    let y = area.y.saturating_add(row).min(area.bottom() - 1);
    Some((x, y))
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Context};

    use super::*;

    #[test]
    fn book_line_bolds_only_the_title() {
        let book = Book::new("Dune", "Frank Herbert", 1965, "Sci-Fi", false);
        let line = book_line(&book);

        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content, "Dune");
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(line.spans[1].content, " by Frank Herbert (1965) - Sci-Fi - Unread");
    }

    #[test]
    fn input_cursor_follows_display_width() {
        let area = Rect::new(10, 5, 40, 6);
        assert_eq!(input_cursor(area, 0, "Title: ", "Dune"), Some((21, 5)));
        assert_eq!(input_cursor(area, 2, "Title: ", "本"), Some((19, 7)));
    }

    #[test]
    fn input_cursor_stays_inside_area() {
        let area = Rect::new(10, 5, 20, 3);
        let long = "x".repeat(100_000);
        assert_eq!(input_cursor(area, 0, "Title: ", &long), Some((29, 5)));
        assert_eq!(input_cursor(area, 9, "Title: ", ""), Some((17, 7)));

        let edge = Rect::new(u16::MAX - 4, 0, 4, 1);
        assert_eq!(input_cursor(edge, 0, "Title: ", "Dune"), Some((u16::MAX - 1, 0)));

        assert_eq!(input_cursor(Rect::new(3, 3, 0, 2), 0, "", ""), None);
    }

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = Err::<(), _>(anyhow!("Publication year is required."))
            .context("failed to add book")
            .unwrap_err();
        assert_eq!(surface_error(&err), "Publication year is required.");
    }
}
