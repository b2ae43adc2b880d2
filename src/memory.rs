use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::models::{Book, NewBook};
use crate::repo::BookRepo;

#[derive(Debug)]
struct Store {
    last_id: i64,
    books: BTreeMap<i64, Book>,
}

/// Keeps books in process memory. Clones share the same store.
///
/// IDs start at 1 and are never handed out twice, even after a delete.
#[derive(Debug, Clone)]
pub struct InMemoryBookRepo {
    store: Arc<Mutex<Store>>,
}

impl InMemoryBookRepo {
    pub fn new() -> Self {
        InMemoryBookRepo {
            store: Arc::new(Mutex::new(Store {
                last_id: 0,
                books: BTreeMap::new(),
            })),
        }
    }
}

impl Default for InMemoryBookRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl BookRepo for InMemoryBookRepo {
    type Error = Infallible;

    async fn find_all(&self) -> Result<Vec<Book>, Infallible> {
        let store = self.store.lock().await;
        Ok(store.books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, Infallible> {
        let store = self.store.lock().await;
        Ok(store.books.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, Infallible> {
        let store = self.store.lock().await;
        Ok(store.books.contains_key(&id))
    }

    async fn insert(&self, new_book: NewBook) -> Result<Book, Infallible> {
        let mut store = self.store.lock().await;
        store.last_id += 1;
        let book = new_book.with_id(store.last_id);
        store.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: i64, new_book: NewBook) -> Result<Option<Book>, Infallible> {
        let mut store = self.store.lock().await;
        Ok(store.books.get_mut(&id).map(|existing| {
            *existing = new_book.with_id(id);
            existing.clone()
        }))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, Infallible> {
        let mut store = self.store.lock().await;
        Ok(store.books.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Kazuo Ishiguro".to_string(),
            price: BigDecimal::from(12),
            published_date: None,
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_in_order_and_not_reused() {
        let repo = InMemoryBookRepo::new();

        let first = repo.insert(new_book("Never Let Me Go")).await.unwrap();
        let second = repo.insert(new_book("The Unconsoled")).await.unwrap();
        assert_eq!(1, first.id);
        assert_eq!(2, second.id);

        assert!(repo.delete_by_id(second.id).await.unwrap());
        let third = repo.insert(new_book("Klara and the Sun")).await.unwrap();
        assert_eq!(3, third.id);
    }

    #[tokio::test]
    async fn clones_share_the_same_store() {
        let repo = InMemoryBookRepo::new();
        let clone = repo.clone();

        let book = clone.insert(new_book("Never Let Me Go")).await.unwrap();

        assert!(repo.exists_by_id(book.id).await.unwrap());
        assert_eq!(vec![book], repo.find_all().await.unwrap());
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let repo = InMemoryBookRepo::new();

        assert_eq!(None, repo.update(5, new_book("Nocturnes")).await.unwrap());
        assert!(!repo.delete_by_id(5).await.unwrap());
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
