//! Input checks shared by create and update.

use thiserror::Error;

/// Which operation is being validated; only changes message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Update,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Update => "update",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("cannot {} book: title is required", .0.verb())]
    MissingName(Operation),

    #[error("cannot {} book: readPage must not exceed pageCount", .0.verb())]
    ReadPageExceedsPageCount(Operation),
}

/// Candidate values a record would end up with.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub name: Option<&'a str>,
    pub page_count: u32,
    pub read_page: u32,
}

/// First failing check wins.
pub fn validate(operation: Operation, candidate: Candidate<'_>) -> Result<(), ValidationError> {
    if candidate.name.map_or(true, str::is_empty) {
        return Err(ValidationError::MissingName(operation));
    }

    if candidate.read_page > candidate.page_count {
        return Err(ValidationError::ReadPageExceedsPageCount(operation));
    }

    Ok(())
}
