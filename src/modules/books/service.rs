use std::sync::Arc;

use shelf_db::{Page, PageRequest, Store, StoreError};

use super::models::{AuthorOfBook, Book, BookDraft, BookResponse};
use crate::modules::authors::models::Author;
use crate::modules::authors::service::AUTHOR_NOT_FOUND;
use crate::modules::error::ServiceError;

pub const BOOK_NOT_FOUND: &str = "Book not found!";
pub const BOOK_ALREADY_EXISTS: &str = "Book already exists!";
pub const BOOK_DOES_NOT_EXIST: &str = "Book does not exist!";

/// Business rules for books: ISBN uniqueness and author resolution.
pub struct BookService {
    books: Arc<dyn Store<Book>>,
    authors: Arc<dyn Store<Author>>,
}

impl BookService {
    pub fn new(books: Arc<dyn Store<Book>>, authors: Arc<dyn Store<Author>>) -> Self {
        Self { books, authors }
    }

    pub async fn find_all(&self, request: &PageRequest) -> Result<Page<BookResponse>, ServiceError> {
        let page = self.books.find_all(request).await?;

        let mut resolved = Vec::with_capacity(page.number_of_elements());
        for book in page.content() {
            resolved.push(self.authors_of(book).await?);
        }

        let mut resolved = resolved.into_iter();
        Ok(page.map(|book| {
            BookResponse::new(book, resolved.next().unwrap_or_default())
        }))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<BookResponse, ServiceError> {
        let book = self
            .books
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(BOOK_NOT_FOUND))?;

        self.respond(book).await
    }

    pub async fn save(&self, draft: BookDraft) -> Result<BookResponse, ServiceError> {
        if self.books.exists_by_unique_key(&draft.isbn13).await? {
            return Err(ServiceError::AlreadyExists(BOOK_ALREADY_EXISTS));
        }
        self.require_authors(&draft.author_ids).await?;

        let book = self
            .books
            .insert(draft.into_book(0))
            .await
            .map_err(conflict_as_exists)?;

        self.respond(book).await
    }

    pub async fn update(&self, id: i64, draft: BookDraft) -> Result<BookResponse, ServiceError> {
        if !self.books.exists_by_id(id).await? {
            return Err(ServiceError::NotFound(BOOK_DOES_NOT_EXIST));
        }
        self.require_authors(&draft.author_ids).await?;

        let book = self
            .books
            .update(draft.into_book(id))
            .await
            .map_err(conflict_as_exists)?;

        self.respond(book).await
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        match self.books.delete_by_id(id).await {
            Err(StoreError::NotFound { .. }) => Err(ServiceError::NotFound(BOOK_DOES_NOT_EXIST)),
            other => Ok(other?),
        }
    }

    async fn require_authors(&self, author_ids: &[i64]) -> Result<(), ServiceError> {
        for &author_id in author_ids {
            if !self.authors.exists_by_id(author_id).await? {
                tracing::warn!(author_id, "book references unknown author");
                return Err(ServiceError::NotFound(AUTHOR_NOT_FOUND));
            }
        }
        Ok(())
    }

    /// Current pseudonyms of the book's authors; deleted authors are skipped.
    async fn authors_of(&self, book: &Book) -> Result<Vec<AuthorOfBook>, ServiceError> {
        let mut authors = Vec::with_capacity(book.author_ids.len());
        for &author_id in &book.author_ids {
            if let Some(author) = self.authors.find_by_id(author_id).await? {
                authors.push(AuthorOfBook {
                    id: author.id,
                    pseudonym: author.pseudonym,
                });
            }
        }
        Ok(authors)
    }

    async fn respond(&self, book: Book) -> Result<BookResponse, ServiceError> {
        let authors = self.authors_of(&book).await?;
        Ok(BookResponse::new(book, authors))
    }
}

fn conflict_as_exists(err: StoreError) -> ServiceError {
    match err {
        StoreError::UniqueViolation { .. } => ServiceError::AlreadyExists(BOOK_ALREADY_EXISTS),
        StoreError::NotFound { .. } => ServiceError::NotFound(BOOK_DOES_NOT_EXIST),
        other => ServiceError::Store(other),
    }
}
