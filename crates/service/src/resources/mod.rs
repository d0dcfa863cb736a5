//! Business operations for the four admin resources.
//!
//! Each resource owns a [`Repository`](crate::repository::Repository) over its
//! entity; the two upload-backed resources also share a
//! [`FileStore`](crate::storage::file_store::FileStore).

pub mod contacts;
pub mod docs;
pub mod gallery;
pub mod services;
pub mod upload;

use axum::body::Bytes;

use crate::errors::ServiceError;

/// One file part taken out of a multipart request.
#[derive(Clone, Debug)]
pub struct UploadedFile {
    /// Name as sent by the client; only its extension reaches the disk.
    pub file_name: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self { file_name: file_name.into(), data: data.into() }
    }
}

/// Parse a record identity taken from a URL path segment.
///
/// Only positive base-10 integers that fit an `i32` are accepted.
pub fn parse_id(raw: &str) -> Result<i32, ServiceError> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ServiceError::Validation(format!("invalid id: {raw:?}"))),
    }
}
