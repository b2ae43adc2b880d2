use crate::models::{Book, NewBook};
use std::error::Error;
use std::future::Future;

pub trait BookRepo {
    type Error: Error + Send + Sync + 'static;

    fn find_all(&self) -> impl Future<Output = Result<Vec<Book>, Self::Error>> + Send;

    fn find_by_id(&self, id: i64) -> impl Future<Output = Result<Option<Book>, Self::Error>> + Send;

    fn exists_by_id(&self, id: i64) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Stores a new book; the store assigns its ID
    fn insert(&self, new_book: NewBook) -> impl Future<Output = Result<Book, Self::Error>> + Send;

    /// Overwrites every mutable field of an existing book. Returns None if no book has this ID
    fn update(
        &self,
        id: i64,
        new_book: NewBook,
    ) -> impl Future<Output = Result<Option<Book>, Self::Error>> + Send;

    /// Returns true if the book existed and was deleted, false otherwise
    fn delete_by_id(&self, id: i64) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
