use thiserror::Error;

use super::schema::{BookField, FieldType};

/// Failures of the book catalog operations.
///
/// Display text here is for logs; client-facing text comes from
/// [`super::messages`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("missing field `{}`", .0.key())]
    MissingField(BookField),

    #[error("field `{}` must be {expected:?}", .field.key())]
    TypeMismatch {
        field: BookField,
        expected: FieldType,
    },

    #[error("readPage {read_page} exceeds pageCount {page_count}")]
    InvalidRange { read_page: u32, page_count: u32 },

    #[error("payload is not a JSON object: {0}")]
    InvalidPayload(String),

    #[error("invalid value {value:?} for query parameter `{param}`")]
    InvalidQuery { param: &'static str, value: String },

    #[error("malformed query string: {0}")]
    MalformedQuery(String),

    #[error("book `{0}` not found")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Fieldless discriminant of [`CatalogError`], used as the message key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingField,
    TypeMismatch,
    InvalidRange,
    InvalidPayload,
    InvalidQuery,
    NotFound,
    Internal,
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::MissingField(_) => ErrorKind::MissingField,
            CatalogError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            CatalogError::InvalidRange { .. } => ErrorKind::InvalidRange,
            CatalogError::InvalidPayload(_) => ErrorKind::InvalidPayload,
            CatalogError::InvalidQuery { .. } | CatalogError::MalformedQuery(_) => {
                ErrorKind::InvalidQuery
            }
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            CatalogError::Internal(_) => ErrorKind::Internal,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
