pub mod errors;
pub mod db;
pub mod services;
pub mod gallery;
pub mod docs;
pub mod contacts;

#[cfg(test)]
mod tests;
