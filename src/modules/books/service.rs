//! Book operations over the JSON document store.

use shelf_db::JsonFileStore;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::error::{BookError, Lookup};
use super::models::{Book, BookPayload, BookSummary};
use super::validation::{validate, Candidate, Operation};

/// Owns the collection document.
///
/// Mutations hold `write_lock` for the whole load-modify-save cycle, so two
/// concurrent writers can never overwrite each other's changes. Reads go
/// straight to the file; saves replace it atomically. File access runs on
/// the blocking pool.
pub struct BookService {
    store: JsonFileStore<Book>,
    write_lock: Mutex<()>,
}

impl BookService {
    pub fn new(store: JsonFileStore<Book>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &JsonFileStore<Book> {
        &self.store
    }

    /// Make sure the document exists (if allowed) and decodes.
    ///
    /// Returns the number of stored books.
    pub fn prepare(&self, create_if_missing: bool) -> Result<usize, BookError> {
        if create_if_missing {
            self.store.ensure_exists()?;
        }
        Ok(self.store.load()?.len())
    }

    async fn load(&self) -> Result<Vec<Book>, BookError> {
        let store = self.store.clone();
        Ok(tokio::task::spawn_blocking(move || store.load()).await??)
    }

    async fn save(&self, books: Vec<Book>) -> Result<Vec<Book>, BookError> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.save(&books).map(|()| books))
            .await?
            .map_err(BookError::from)
    }

    pub async fn list(&self) -> Result<Vec<BookSummary>, BookError> {
        Ok(self.load().await?.iter().map(Book::summary).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Book, BookError> {
        self.load()
            .await?
            .into_iter()
            .find(|book| book.id == id)
            .ok_or(BookError::NotFound(Lookup::Get))
    }

    /// Validate, assign id and timestamps, append and persist. Returns the new id.
    pub async fn create(&self, payload: BookPayload) -> Result<String, BookError> {
        let payload = payload.without_reserved();
        validate(
            Operation::Add,
            Candidate {
                name: payload.name(),
                page_count: payload.page_count.unwrap_or_default(),
                read_page: payload.read_page.unwrap_or_default(),
            },
        )?;

        let _guard = self.write_lock.lock().await;
        let mut books = self.load().await?;

        let id = unused_id(&books);
        let book = Book::create(id.clone(), payload, OffsetDateTime::now_utc());
        books.push(book);
        let books = self.save(books).await?;

        tracing::info!(book_id = %id, total = books.len(), "book added");
        Ok(id)
    }

    /// Shallow-merge `payload` over the stored book and persist.
    pub async fn update(&self, id: &str, payload: BookPayload) -> Result<Book, BookError> {
        let payload = payload.without_reserved();

        let _guard = self.write_lock.lock().await;
        let mut books = self.load().await?;

        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(BookError::NotFound(Lookup::Update))?;

        validate(
            Operation::Update,
            Candidate {
                name: match &payload.name {
                    Some(name) => name.as_deref(),
                    None => Some(book.name.as_str()),
                },
                page_count: payload.page_count.unwrap_or(book.page_count),
                read_page: payload.read_page.unwrap_or(book.read_page),
            },
        )?;

        // Never move `updated_at` backwards if the wall clock steps back.
        let now = OffsetDateTime::now_utc().max(book.updated_at);
        book.apply(payload, now);
        let updated = book.clone();

        self.save(books).await?;

        tracing::info!(book_id = %id, "book updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), BookError> {
        let _guard = self.write_lock.lock().await;
        let mut books = self.load().await?;

        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or(BookError::NotFound(Lookup::Delete))?;
        books.remove(index);
        let books = self.save(books).await?;

        tracing::info!(book_id = %id, total = books.len(), "book deleted");
        Ok(())
    }
}

/// Random id not already present in `books`.
fn unused_id(books: &[Book]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if books.iter().all(|book| book.id != id) {
            return id;
        }
    }
}
