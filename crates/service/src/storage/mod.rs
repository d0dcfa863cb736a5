//! Disk-backed storage used by the upload resources.

pub mod file_store;
