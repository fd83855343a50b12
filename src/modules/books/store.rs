use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::models::{Book, BookFilter, BookInput};

/// Storage seam for book records.
///
/// Implementations must keep insertion order as listing order and apply
/// each write atomically.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Append a record to the end of the collection
    async fn insert(&self, book: Book) -> anyhow::Result<()>;

    /// Records matching `filter`, in insertion order
    async fn list(&self, filter: &BookFilter) -> anyhow::Result<Vec<Book>>;

    async fn get(&self, id: &str) -> anyhow::Result<Option<Book>>;

    /// Replace the mutable fields of record `id`; `None` if it does not exist
    async fn update(
        &self,
        id: &str,
        input: BookInput,
        at: OffsetDateTime,
    ) -> anyhow::Result<Option<Book>>;

    /// Remove record `id`; `false` if it did not exist
    async fn remove(&self, id: &str) -> anyhow::Result<bool>;

    async fn count(&self) -> anyhow::Result<usize>;
}

/// Process-local store backed by an ordered vector.
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookStore {
    async fn insert(&self, book: Book) -> anyhow::Result<()> {
        self.books.write().await.push(book);
        Ok(())
    }

    async fn list(&self, filter: &BookFilter) -> anyhow::Result<Vec<Book>> {
        let books = self.books.read().await;
        Ok(books
            .iter()
            .filter(|book| filter.matches(book))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> anyhow::Result<Option<Book>> {
        let books = self.books.read().await;
        Ok(books.iter().find(|book| book.id == id).cloned())
    }

    async fn update(
        &self,
        id: &str,
        input: BookInput,
        at: OffsetDateTime,
    ) -> anyhow::Result<Option<Book>> {
        let mut books = self.books.write().await;
        let Some(book) = books.iter_mut().find(|book| book.id == id) else {
            return Ok(None);
        };

        book.apply(input, at);
        Ok(Some(book.clone()))
    }

    async fn remove(&self, id: &str) -> anyhow::Result<bool> {
        let mut books = self.books.write().await;
        match books.iter().position(|book| book.id == id) {
            Some(index) => {
                books.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> anyhow::Result<usize> {
        Ok(self.books.read().await.len())
    }
}
