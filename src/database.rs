use crate::models::{Book, NewBook};
use crate::repo::BookRepo;
use crate::schema::books;
use bb8::Pool;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::{
    pooled_connection::{AsyncDieselConnectionManager, PoolError},
    AsyncPgConnection, RunQueryDsl,
};

pub type DBPool = bb8::Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

pub async fn create_db_pool(connection_string: &str, max_size: u32) -> Result<DBPool, PoolError> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(connection_string);
    Pool::builder().max_size(max_size).build(manager).await
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("problem getting a connection from the connection pool: {0}")]
    Pool(#[from] bb8::RunError<PoolError>),
    #[error("problem executing a statement against the DB: {0}")]
    Query(#[from] diesel::result::Error),
}

#[derive(Clone)]
pub struct DatabaseBookRepo {
    pool: DBPool,
}

impl DatabaseBookRepo {
    pub fn new(pool: DBPool) -> Self {
        DatabaseBookRepo { pool }
    }
}

impl BookRepo for DatabaseBookRepo {
    type Error = DatabaseError;

    async fn find_all(&self) -> Result<Vec<Book>, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let books = books::table
            .select(Book::as_select())
            .order(books::id.asc())
            .load(&mut conn)
            .await?;

        Ok(books)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let maybe_book = books::table
            .find(id)
            .select(Book::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(maybe_book)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let exists = diesel::select(diesel::dsl::exists(books::table.find(id)))
            .get_result::<bool>(&mut conn)
            .await?;

        Ok(exists)
    }

    async fn insert(&self, new_book: NewBook) -> Result<Book, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let inserted_book = diesel::insert_into(books::table)
            .values(new_book)
            .returning(Book::as_returning())
            .get_result(&mut conn)
            .await?;

        Ok(inserted_book)
    }

    async fn update(&self, id: i64, new_book: NewBook) -> Result<Option<Book>, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let updated_book = diesel::update(books::table.find(id))
            .set(new_book)
            .returning(Book::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?;

        Ok(updated_book)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(books::table.find(id))
            .execute(&mut conn)
            .await
            .map(|affected_rows| affected_rows == 1)?;

        Ok(deleted)
    }
}
