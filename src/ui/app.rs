use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::debug;

use crate::error::StoreError;
use crate::models::Book;
use crate::store::BookStore;

use super::forms::{BookField, BookForm, LineInput};
use super::helpers::{book_items, input_cursor, surface_error};
use super::screens::{ListCursor, Page, Screen, SearchScreen};

/// Header band holding the application title and library path.
const HEADER_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the sidebar menu.
const MENU_WIDTH: u16 = 22;
/// Rows skipped by PageUp/PageDown in book lists.
const PAGE_JUMP: isize = 5;
/// Prompt in front of the remove page input.
const REMOVE_PROMPT: &str = "Title";
/// Prompt in front of the search page input.
const SEARCH_PROMPT: &str = "Title or author";

/// Which half of the window receives key presses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Menu,
    Page,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state. The app owns the only [`BookStore`] for the
/// session and calls into it once per submitted action.
pub struct App {
    store: BookStore,
    page: Page,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: BookStore) -> Self {
        Self {
            store,
            page: Page::AddBook,
            screen: Screen::for_page(Page::AddBook),
            mode: Mode::Menu,
            status: None,
        }
    }

    pub fn store(&self) -> &BookStore {
        &self.store
    }

    /// Apply one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        match self.mode {
            Mode::Menu => self.handle_menu_key(code, &mut exit),
            Mode::Page => self.handle_page_key(code)?,
        }
        Ok(exit)
    }

    fn handle_menu_key(&mut self, code: KeyCode, exit: &mut bool) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up => self.select_page(self.page.offset(-1)),
            KeyCode::Down => self.select_page(self.page.offset(1)),
            KeyCode::Home => self.select_page(Page::AddBook),
            KeyCode::End => self.select_page(Page::Statistics),
            KeyCode::Enter | KeyCode::Right | KeyCode::Tab => {
                self.clear_status();
                self.mode = Mode::Page;
            }
            _ => {}
        }
    }

    fn handle_page_key(&mut self, code: KeyCode) -> Result<()> {
        if code == KeyCode::Esc {
            self.mode = Mode::Menu;
            return Ok(());
        }

        let mut screen = mem::replace(&mut self.screen, Screen::Statistics);
        let result = match &mut screen {
            Screen::AddBook(form) => self.handle_add_book(code, form),
            Screen::RemoveBook(input) => self.handle_remove_book(code, input),
            Screen::SearchBooks(search) => self.handle_search(code, search),
            Screen::ViewLibrary(cursor) => {
                self.handle_library(code, cursor);
                Ok(())
            }
            Screen::Statistics => {
                if code == KeyCode::Left {
                    self.mode = Mode::Menu;
                }
                Ok(())
            }
        };
        self.screen = screen;
        result
    }

    fn handle_add_book(&mut self, code: KeyCode, form: &mut BookForm) -> Result<()> {
        match code {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => self.submit_book(form)?,
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Validate the form, then hand the raw values to the store. Validation
    /// problems stay in the form; a failed write aborts the session.
    fn submit_book(&mut self, form: &mut BookForm) -> Result<()> {
        if let Err(err) = form.validate() {
            let message = surface_error(&err);
            form.error = Some(message.clone());
            self.set_status(message, StatusKind::Error);
            return Ok(());
        }

        let added = self
            .store
            .add(&form.title, &form.author, &form.year, &form.genre, form.read)
            .map(|_| ());
        match added {
            Ok(()) => {
                *form = BookForm::default();
                self.set_status("Book added successfully!", StatusKind::Info);
            }
            Err(err @ StoreError::InvalidYear { .. }) => {
                let message = err.to_string();
                form.error = Some(message.clone());
                self.set_status(message, StatusKind::Error);
            }
            Err(err) => return Err(err).context("failed to add book"),
        }
        Ok(())
    }

    fn handle_remove_book(&mut self, code: KeyCode, input: &mut LineInput) -> Result<()> {
        match code {
            KeyCode::Backspace => input.backspace(),
            KeyCode::Enter => {
                let removed = self
                    .store
                    .remove(&input.value)
                    .context("failed to remove book")?;
                if removed {
                    input.clear();
                    self.set_status("Book removed successfully!", StatusKind::Info);
                } else {
                    self.set_status("Book not found.", StatusKind::Error);
                }
            }
            KeyCode::Char(ch) => {
                input.push_char(ch);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_search(&mut self, code: KeyCode, search: &mut SearchScreen) -> Result<()> {
        let len = search.result_count();
        match code {
            KeyCode::Up => search.cursor.move_selection(-1, len),
            KeyCode::Down => search.cursor.move_selection(1, len),
            KeyCode::PageUp => search.cursor.move_selection(-PAGE_JUMP, len),
            KeyCode::PageDown => search.cursor.move_selection(PAGE_JUMP, len),
            KeyCode::Home => search.cursor.select_first(),
            KeyCode::End => search.cursor.select_last(len),
            KeyCode::Backspace => search.input.backspace(),
            KeyCode::Enter => {
                let results = self.store.search(&search.input.value);
                debug!(keyword = %search.input.value, matches = results.len(), "search");
                if results.is_empty() {
                    self.set_status("No matching books found.", StatusKind::Warning);
                } else {
                    self.clear_status();
                }
                search.set_results(results);
            }
            KeyCode::Char(ch) => {
                search.input.push_char(ch);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_library(&mut self, code: KeyCode, cursor: &mut ListCursor) {
        let len = self.store.books().len();
        match code {
            KeyCode::Left => self.mode = Mode::Menu,
            KeyCode::Up => cursor.move_selection(-1, len),
            KeyCode::Down => cursor.move_selection(1, len),
            KeyCode::PageUp => cursor.move_selection(-PAGE_JUMP, len),
            KeyCode::PageDown => cursor.move_selection(PAGE_JUMP, len),
            KeyCode::Home => cursor.select_first(),
            KeyCode::End => cursor.select_last(len),
            _ => {}
        }
        cursor.ensure_in_bounds(len);
    }

    fn select_page(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        debug!(page = page.label(), "page selected");
        self.page = page;
        self.screen = Screen::for_page(page);
        self.clear_status();
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(0)])
            .split(chunks[1]);
        self.draw_menu(frame, body[0]);
        self.draw_page(frame, body[1]);

        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "Personal Library Manager",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.store.path().display().to_string(),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, area);
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = Page::ALL
            .iter()
            .map(|page| ListItem::new(page.label()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .title("Menu")
                    .borders(Borders::ALL)
                    .border_style(self.focus_style(Mode::Menu)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(self.page.index()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_page(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(self.page.heading())
            .borders(Borders::ALL)
            .border_style(self.focus_style(Mode::Page));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &self.screen {
            Screen::AddBook(form) => self.draw_book_form(frame, inner, form),
            Screen::RemoveBook(input) => self.draw_remove_form(frame, inner, input),
            Screen::SearchBooks(search) => self.draw_search(frame, inner, search),
            Screen::ViewLibrary(cursor) => self.draw_library(frame, inner, cursor),
            Screen::Statistics => self.draw_statistics(frame, inner),
        }
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, form: &BookForm) {
        let mut lines: Vec<Line> = BookField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to add • Tab to switch fields • Space toggles read • Esc for menu",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);

        if self.mode == Mode::Page && form.active != BookField::Read {
            let prefix = format!("{}: ", form.active.label());
            let row = BookForm::row(form.active);
            if let Some(position) = input_cursor(area, row, &prefix, form.value(form.active)) {
                frame.set_cursor_position(position);
            }
        }
    }

    fn draw_remove_form(&self, frame: &mut Frame, area: Rect, input: &LineInput) {
        let focused = self.mode == Mode::Page;
        let lines = vec![
            input.build_line(REMOVE_PROMPT, focused),
            Line::from(""),
            Line::from(Span::styled(
                "Enter the title of the book to remove, then press Enter.",
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);

        if focused {
            self.place_prompt_cursor(frame, area, REMOVE_PROMPT, input);
        }
    }

    fn draw_search(&self, frame: &mut Frame, area: Rect, search: &SearchScreen) {
        let focused = self.mode == Mode::Page;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let prompt = Paragraph::new(vec![
            search.input.build_line(SEARCH_PROMPT, focused),
            Line::from(Span::styled(
                "Press Enter to search.",
                Style::default().fg(Color::Gray),
            )),
        ]);
        frame.render_widget(prompt, chunks[0]);

        match &search.results {
            None => {}
            Some(results) if results.is_empty() => {
                let message = Paragraph::new("No matching books found.")
                    .style(Style::default().fg(Color::Yellow));
                frame.render_widget(message, chunks[1]);
            }
            Some(results) => {
                self.render_book_list(frame, chunks[1], results, search.cursor.selected)
            }
        }

        if focused {
            self.place_prompt_cursor(frame, chunks[0], SEARCH_PROMPT, &search.input);
        }
    }

    fn draw_library(&self, frame: &mut Frame, area: Rect, cursor: &ListCursor) {
        let books = self.store.books();
        if books.is_empty() {
            frame.render_widget(Paragraph::new("Your library is empty."), area);
            return;
        }
        self.render_book_list(frame, area, books, cursor.selected);
    }

    fn draw_statistics(&self, frame: &mut Frame, area: Rect) {
        let stats = self.store.statistics();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let summary = Paragraph::new(vec![
            Line::from(format!("Total books: {}", stats.total)),
            Line::from(format!("Percentage read: {:.2}%", stats.percent_read)),
        ]);
        frame.render_widget(summary, chunks[0]);

        let gauge = Gauge::default()
            .block(Block::default().title("Read").borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(stats.ratio())
            .label(format!("{:.2}%", stats.percent_read));
        frame.render_widget(gauge, chunks[1]);
    }

    fn render_book_list(&self, frame: &mut Frame, area: Rect, books: &[Book], selected: usize) {
        let mut list = List::new(book_items(books));
        if self.mode == Mode::Page {
            list = list
                .highlight_style(Style::default().fg(Color::Yellow))
                .highlight_symbol("> ");
        }
        let mut state = ListState::default().with_selected(Some(selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn place_prompt_cursor(&self, frame: &mut Frame, area: Rect, prompt: &str, input: &LineInput) {
        let prefix = format!("{prompt}: ");
        if let Some(position) = input_cursor(area, 0, &prefix, &input.value) {
            frame.set_cursor_position(position);
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let mut spans = match (self.mode, &self.screen) {
            (Mode::Menu, _) => vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Choose Page   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Open   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit   "),
            ],
            (Mode::Page, Screen::AddBook(_)) => vec![
                Span::styled("[Tab/↑↓]", key_style),
                Span::raw(" Field   "),
                Span::styled("[Space]", key_style),
                Span::raw(" Toggle Read   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Add Book   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Menu   "),
            ],
            (Mode::Page, Screen::RemoveBook(_)) => vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Remove Book   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Menu   "),
            ],
            (Mode::Page, Screen::SearchBooks(_)) => vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Search   "),
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Menu   "),
            ],
            (Mode::Page, Screen::ViewLibrary(_)) => vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[PgUp/PgDn]", key_style),
                Span::raw(" Page   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Menu   "),
            ],
            (Mode::Page, Screen::Statistics) => vec![
                Span::styled("[Esc]", key_style),
                Span::raw(" Menu   "),
            ],
        };
        spans.push(Span::styled("[Ctrl+C]", key_style));
        spans.push(Span::raw(" Quit"));
        Line::from(spans)
    }

    fn focus_style(&self, mode: Mode) -> Style {
        if self.mode == mode {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
