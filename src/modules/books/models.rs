use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use shelf_db::Entity;
use shelf_http::{FieldError, Validate, Violations};
use time::Date;

const TITLE_MAX: usize = 150;
const PUBLISHER_MAX: usize = 100;
const ISBN13_LEN: usize = 13;

/// Stored book record. Authors are kept as identifiers and resolved when the
/// book is sent out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub author_ids: Vec<i64>,
    pub total_pages: u32,
    pub publisher: String,
    pub published_date: Date,
    /// Unique business key
    pub isbn13: String,
}

impl Entity for Book {
    const KIND: &'static str = "book";

    fn id(&self) -> i64 {
        self.id
    }

    fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.isbn13)
    }

    fn sortable_fields() -> &'static [&'static str] {
        &[
            "id",
            "title",
            "subtitle",
            "totalPages",
            "publisher",
            "publishedDate",
            "isbn13",
        ]
    }

    fn compare_by(&self, other: &Self, field: &str) -> Option<Ordering> {
        let ordering = match field {
            "id" => self.id.cmp(&other.id),
            "title" => self.title.cmp(&other.title),
            "subtitle" => self.subtitle.cmp(&other.subtitle),
            "totalPages" => self.total_pages.cmp(&other.total_pages),
            "publisher" => self.publisher.cmp(&other.publisher),
            "publishedDate" => self.published_date.cmp(&other.published_date),
            "isbn13" => self.isbn13.cmp(&other.isbn13),
            _ => return None,
        };
        Some(ordering)
    }
}

/// Author reference as it appears on a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorOfBook {
    pub id: i64,
    pub pseudonym: String,
}

/// Book as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub authors: Vec<AuthorOfBook>,
    pub total_pages: u32,
    pub publisher: String,
    pub published_date: Date,
    pub isbn13: String,
}

impl BookResponse {
    pub fn new(book: Book, authors: Vec<AuthorOfBook>) -> Self {
        Self {
            id: book.id,
            title: book.title,
            subtitle: book.subtitle,
            authors,
            total_pages: book.total_pages,
            publisher: book.publisher,
            published_date: book.published_date,
            isbn13: book.isbn13,
        }
    }
}

/// Author reference in a request; only `id` is used, the pseudonym is
/// always taken from the author record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorOfBookRequest {
    pub id: Option<i64>,
    #[serde(default)]
    pub pseudonym: Option<String>,
}

/// Body of `save` and `update` requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub authors: Vec<AuthorOfBookRequest>,
    pub total_pages: Option<i64>,
    #[serde(default)]
    pub publisher: String,
    pub published_date: Option<Date>,
    #[serde(default)]
    pub isbn13: String,
}

/// Validated book fields, everything but the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub subtitle: Option<String>,
    pub author_ids: Vec<i64>,
    pub total_pages: u32,
    pub publisher: String,
    pub published_date: Date,
    pub isbn13: String,
}

impl BookDraft {
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            subtitle: self.subtitle,
            author_ids: self.author_ids,
            total_pages: self.total_pages,
            publisher: self.publisher,
            published_date: self.published_date,
            isbn13: self.isbn13,
        }
    }
}

fn is_isbn13(value: &str) -> bool {
    value.len() == ISBN13_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

impl Validate for BookRequest {
    type Valid = BookDraft;

    fn validate(self) -> Result<BookDraft, Vec<FieldError>> {
        let mut violations = Violations::new();

        violations.not_blank("title", &self.title);
        violations.max_len("title", &self.title, TITLE_MAX);
        if let Some(subtitle) = &self.subtitle {
            violations.max_len("subtitle", subtitle, TITLE_MAX);
        }

        violations.check(!self.authors.is_empty(), "authors", "must not be empty");
        let mut author_ids = Vec::with_capacity(self.authors.len());
        for (index, author) in self.authors.iter().enumerate() {
            if let Some(id) = violations.required(&format!("authors[{index}].id"), author.id) {
                author_ids.push(id);
            }
        }
        let distinct: HashSet<i64> = author_ids.iter().copied().collect();
        violations.check(
            distinct.len() == author_ids.len(),
            "authors",
            "must not contain the same author twice",
        );

        let total_pages = violations
            .required("totalPages", self.total_pages)
            .and_then(|pages| match u32::try_from(pages) {
                Ok(pages) if pages >= 1 => Some(pages),
                _ => {
                    violations.add("totalPages", "must be greater than 0");
                    None
                }
            });

        violations.not_blank("publisher", &self.publisher);
        violations.max_len("publisher", &self.publisher, PUBLISHER_MAX);
        let published_date = violations.required("publishedDate", self.published_date);

        violations.check(is_isbn13(&self.isbn13), "isbn13", "must be exactly 13 digits");

        match (total_pages, published_date) {
            (Some(total_pages), Some(published_date)) if violations.is_empty() => Ok(BookDraft {
                title: self.title,
                subtitle: self.subtitle,
                author_ids,
                total_pages,
                publisher: self.publisher,
                published_date,
                isbn13: self.isbn13,
            }),
            _ => Err(violations.into_errors()),
        }
    }
}
