use regex::Regex;
use std::sync::LazyLock;

static BOOK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\* \*([^*\n]+)\* by \*([^*\n]+)\*:[ \t]*(.*?)[ \t]*$")
        .expect("valid regex")
});
static PREAMBLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^here's an analysis of the image(?: and book recommendations)?:?\s*")
        .expect("valid regex")
});

/// Number of books the prompt asks for.
pub const EXPECTED_BOOKS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEntry {
    pub title: String,
    pub author: String,
    pub description: String,
}

/// Best-effort reading of a generated answer. Only used to observe how well
/// the model followed the format; callers always receive the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recommendations {
    pub analysis: Option<String>,
    pub books: Vec<BookEntry>,
}

impl Recommendations {
    pub fn parse(text: &str) -> Self {
        let books: Vec<BookEntry> = BOOK_LINE_RE
            .captures_iter(text)
            .map(|caps| BookEntry {
                title: caps[1].trim().to_string(),
                author: caps[2].trim().to_string(),
                description: caps[3].trim().to_string(),
            })
            .collect();

        let head = match BOOK_LINE_RE.find(text) {
            Some(first) => &text[..first.start()],
            None => text,
        };
        let analysis = PREAMBLE_RE.replace(head.trim(), "").trim().to_string();

        Self {
            analysis: (!analysis.is_empty()).then_some(analysis),
            books,
        }
    }

    /// Exactly three entries and an analysis paragraph.
    pub fn conforms(&self) -> bool {
        self.books.len() == EXPECTED_BOOKS && self.analysis.is_some()
    }
}
