//! Service layer: business operations for the admin resources on top of `models`.
//! - `repository` holds the generic CRUD gateway over sea-orm entities.
//! - `storage` persists uploaded files.
//! - `resources` implements per-resource validation and lifecycles.

pub mod errors;
pub mod repository;
pub mod resources;
pub mod storage;
#[cfg(test)]
pub mod test_support;
