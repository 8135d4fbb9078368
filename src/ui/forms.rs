use anyhow::{anyhow, Context, Result};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Lowest publication year the add form accepts.
pub(crate) const MIN_YEAR: i64 = 1000;
/// Highest publication year the add form accepts.
pub(crate) const MAX_YEAR: i64 = 2100;

/// Internal representation of the "Add a New Book" form.
#[derive(Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: String,
    pub(crate) genre: String,
    pub(crate) read: bool,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

impl Default for BookForm {
    /// Blank text fields with the year seeded at the lowest accepted value.
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            year: MIN_YEAR.to_string(),
            genre: String::new(),
            read: false,
            active: BookField::Title,
            error: None,
        }
    }
}

/// Fields available within the book form, in tab order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Year,
    Genre,
    Read,
}

impl BookField {
    pub(crate) const ALL: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::Year,
        BookField::Genre,
        BookField::Read,
    ];

    /// Label rendered in front of the field value.
    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Year => "Publication Year",
            BookField::Genre => "Genre",
            BookField::Read => "Have you read this book?",
        }
    }

    fn index(self) -> usize {
        BookField::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }
}

impl BookForm {
    /// Move focus to the next field, wrapping from the checkbox to the title.
    pub(crate) fn next_field(&mut self) {
        let next = (self.active.index() + 1) % BookField::ALL.len();
        self.active = BookField::ALL[next];
    }

    /// Move focus to the previous field, wrapping from the title to the
    /// checkbox.
    pub(crate) fn previous_field(&mut self) {
        let len = BookField::ALL.len();
        let previous = (self.active.index() + len - 1) % len;
        self.active = BookField::ALL[previous];
    }

    /// Append a character to the active field. The year only takes digits and
    /// the checkbox only reacts to space.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            BookField::Title => self.title.push(ch),
            BookField::Author => self.author.push(ch),
            BookField::Year => {
                if !ch.is_ascii_digit() {
                    return false;
                }
                self.year.push(ch);
            }
            BookField::Genre => self.genre.push(ch),
            BookField::Read => {
                if ch != ' ' {
                    return false;
                }
                self.read = !self.read;
            }
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            BookField::Title => {
                self.title.pop();
            }
            BookField::Author => {
                self.author.pop();
            }
            BookField::Year => {
                self.year.pop();
            }
            BookField::Genre => {
                self.genre.pop();
            }
            BookField::Read => {}
        }
    }

    /// Check the year against the range the form allows. Text fields are
    /// passed through untouched.
    pub(crate) fn validate(&self) -> Result<()> {
        let raw = self.year.trim();
        if raw.is_empty() {
            return Err(anyhow!("Publication year is required."));
        }
        raw.parse::<i64>()
            .ok()
            .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
            .map(|_| ())
            .with_context(|| {
                format!("Publication year must be between {MIN_YEAR} and {MAX_YEAR}.")
            })
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: BookField) -> Line<'static> {
        let is_active = self.active == field;
        if field == BookField::Read {
            let mark = if self.read { "[x]" } else { "[ ]" };
            let style = if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            return Line::from(vec![
                Span::styled(mark.to_string(), style.add_modifier(Modifier::BOLD)),
                Span::styled(format!(" {}", field.label()), style),
            ]);
        }

        let value = self.value(field);
        let display = if value.is_empty() {
            "<empty>".to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Row of `field` within the rendered form.
    pub(crate) fn row(field: BookField) -> usize {
        field.index()
    }

    /// Current text of `field`; empty for the checkbox.
    pub(crate) fn value(&self, field: BookField) -> &str {
        match field {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Year => &self.year,
            BookField::Genre => &self.genre,
            BookField::Read => "",
        }
    }
}

/// A single-line text prompt, used by the remove and search pages.
#[derive(Default, Clone)]
pub(crate) struct LineInput {
    pub(crate) value: String,
}

impl LineInput {
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    pub(crate) fn clear(&mut self) {
        self.value.clear();
    }

    /// Render the prompt, highlighting the value while the page has focus.
    pub(crate) fn build_line(&self, prompt: &str, focused: bool) -> Line<'static> {
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::raw(format!("{prompt}: ")),
            Span::styled(self.value.clone(), style),
        ])
    }
}
