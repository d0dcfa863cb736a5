//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Create `dir` (and parents) if it does not exist yet.
pub async fn ensure_dir(dir: impl AsRef<Path>) -> anyhow::Result<()> {
    let dir = dir.as_ref();
    if tokio::fs::metadata(dir).await.is_ok() {
        return Ok(());
    }
    warn!(dir = %dir.display(), "directory missing; creating");
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    info!(dir = %dir.display(), "directory created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_dir_creates_nested_and_is_idempotent() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("ensure_dir_{}", uuid::Uuid::new_v4()));
        let nested = root.join("a").join("b");

        ensure_dir(&nested).await?;
        assert!(tokio::fs::metadata(&nested).await?.is_dir());

        // second call on an existing directory is a no-op
        ensure_dir(&nested).await?;

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
