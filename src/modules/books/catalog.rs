use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;

use super::error::{CatalogError, CatalogResult};
use super::models::{Book, BookFilter, BookInput, BookSummary};
use super::store::BookRepository;

/// The book catalog service: domain rules on top of a [`BookRepository`].
#[derive(Clone)]
pub struct BookCatalog {
    repo: Arc<dyn BookRepository>,
}

impl BookCatalog {
    pub fn new(repo: Arc<dyn BookRepository>) -> Self {
        Self { repo }
    }

    /// Store a new book and return its generated id
    pub async fn create(&self, input: BookInput) -> CatalogResult<String> {
        ensure_page_range(&input)?;

        let id = Uuid::now_v7().to_string();
        let book = Book::new(id.clone(), input, OffsetDateTime::now_utc());
        self.repo.insert(book).await?;

        tracing::info!(book_id = %id, "book added");
        Ok(id)
    }

    /// Projections of the books matching `filter`, in insertion order
    pub async fn list(&self, filter: &BookFilter) -> CatalogResult<Vec<BookSummary>> {
        let books = self.repo.list(filter).await?;
        Ok(books.iter().map(Book::to_summary).collect())
    }

    pub async fn get(&self, id: &str) -> CatalogResult<Book> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Replace every mutable field of book `id`
    pub async fn update(&self, id: &str, input: BookInput) -> CatalogResult<String> {
        ensure_page_range(&input)?;

        let book = self
            .repo
            .update(id, input, OffsetDateTime::now_utc())
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        tracing::info!(book_id = %book.id, "book updated");
        Ok(book.id)
    }

    pub async fn delete(&self, id: &str) -> CatalogResult<()> {
        if !self.repo.remove(id).await? {
            return Err(CatalogError::NotFound(id.to_string()));
        }

        tracing::info!(book_id = %id, "book deleted");
        Ok(())
    }

    pub async fn count(&self) -> CatalogResult<usize> {
        Ok(self.repo.count().await?)
    }
}

fn ensure_page_range(input: &BookInput) -> CatalogResult<()> {
    if input.read_page > input.page_count {
        return Err(CatalogError::InvalidRange {
            read_page: input.read_page,
            page_count: input.page_count,
        });
    }
    Ok(())
}
