use shelf_db::StorageError;
use shelf_http::AppError;
use thiserror::Error;

use super::validation::ValidationError;

#[derive(Debug, Error)]
pub enum BookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{}", .0.message())]
    NotFound(Lookup),

    #[error("book storage failed")]
    Storage(#[from] StorageError),

    #[error("book storage task failed")]
    Task(#[from] tokio::task::JoinError),
}

/// Operation that failed to find its book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Get,
    Update,
    Delete,
}

impl Lookup {
    pub fn message(self) -> &'static str {
        match self {
            Lookup::Get => "book not found",
            Lookup::Update => "cannot update book: id not found",
            Lookup::Delete => "cannot delete book: id not found",
        }
    }
}

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::Validation(e) => AppError::validation(e.to_string()),
            BookError::NotFound(lookup) => AppError::not_found(lookup.message()),
            BookError::Storage(e) => {
                AppError::Internal(anyhow::Error::new(e).context("book storage failed"))
            }
            BookError::Task(e) => {
                AppError::Internal(anyhow::Error::new(e).context("book storage task failed"))
            }
        }
    }
}
