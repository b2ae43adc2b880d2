use tracing::{debug, info, warn};

use crate::models::{Book, NewBook};
use crate::repo::BookRepo;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError<E> {
    #[error("Book with id: {0} not found.")]
    NotFound(i64),
    #[error("repository failure: {0}")]
    Repository(#[source] E),
}

/// Business rules on top of a [`BookRepo`]: ID-keyed operations fail with
/// [`ServiceError::NotFound`] when the book does not exist.
#[derive(Clone)]
pub struct BookService<R> {
    repo: R,
}

impl<R: BookRepo> BookService<R> {
    pub fn new(repo: R) -> Self {
        BookService { repo }
    }

    pub async fn add_book(&self, new_book: NewBook) -> Result<Book, ServiceError<R::Error>> {
        info!("Adding book: {}", new_book.title);
        self.repo
            .insert(new_book)
            .await
            .map_err(ServiceError::Repository)
    }

    pub async fn get_books(&self) -> Result<Vec<Book>, ServiceError<R::Error>> {
        info!("Fetching all books");
        self.repo.find_all().await.map_err(ServiceError::Repository)
    }

    pub async fn get_book_by_id(&self, id: i64) -> Result<Book, ServiceError<R::Error>> {
        debug!("Fetching book by ID: {}", id);
        self.ensure_exists(id).await?;

        // The book can still disappear between the check and the read.
        self.repo
            .find_by_id(id)
            .await
            .map_err(ServiceError::Repository)?
            .ok_or_else(|| not_found(id))
    }

    /// Replaces title, author, price and published date. Fields absent from
    /// `new_book` are cleared, not kept.
    pub async fn update_book(
        &self,
        id: i64,
        new_book: NewBook,
    ) -> Result<Book, ServiceError<R::Error>> {
        info!("Updating book with ID: {}", id);
        self.repo
            .update(id, new_book)
            .await
            .map_err(ServiceError::Repository)?
            .ok_or_else(|| not_found(id))
    }

    pub async fn delete_book(&self, id: i64) -> Result<(), ServiceError<R::Error>> {
        info!("Deleting book with ID: {}", id);
        self.ensure_exists(id).await?;

        let deleted = self
            .repo
            .delete_by_id(id)
            .await
            .map_err(ServiceError::Repository)?;

        if deleted {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    async fn ensure_exists(&self, id: i64) -> Result<(), ServiceError<R::Error>> {
        let exists = self
            .repo
            .exists_by_id(id)
            .await
            .map_err(ServiceError::Repository)?;

        if exists {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}

fn not_found<E>(id: i64) -> ServiceError<E> {
    warn!("Book with ID {} not found", id);
    ServiceError::NotFound(id)
}
