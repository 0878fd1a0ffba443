pub mod authors;
pub mod books;
pub mod error;

use std::sync::Arc;

use shelf_db::{MemoryStore, Store};
use shelf_kernel::ModuleRegistry;

use authors::{models::Author, service::AuthorService};
use books::{models::Book, service::BookService};

/// Wire stores, services and modules, then register the modules
pub fn register_all(registry: &mut ModuleRegistry) {
    let author_store: Arc<dyn Store<Author>> = Arc::new(MemoryStore::<Author>::new());
    let book_store: Arc<dyn Store<Book>> = Arc::new(MemoryStore::<Book>::new());

    let author_service = Arc::new(AuthorService::new(author_store.clone()));
    let book_service = Arc::new(BookService::new(book_store, author_store));

    registry.register(authors::create_module(author_service));
    registry.register(books::create_module(book_service));
}
