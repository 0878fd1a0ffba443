//! Persistence collaborator for Shelf entities.
//!
//! A [`Store`] owns entity rows, assigns identifiers, enforces the single unique
//! business key of an [`Entity`], and answers paginated, sorted queries.
//! [`MemoryStore`] is the in-process implementation wired by the application.

pub mod memory;
pub mod pagination;
pub mod store;

pub use memory::MemoryStore;
pub use pagination::{Direction, Page, PageRequest, Sort};
pub use store::{Entity, Store, StoreError};
