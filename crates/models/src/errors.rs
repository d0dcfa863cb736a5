use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}

/// Fail with a `Validation` error naming every empty field in `fields`.
pub fn require_non_empty(fields: &[(&str, &str)]) -> Result<(), ModelError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(ModelError::Validation(format!("required fields are empty: {}", missing.join(", "))))
}
