use std::path::{Path, PathBuf};

use rand::{distributions::Alphanumeric, Rng};
use tokio::{
    fs,
    io::{self, AsyncRead, AsyncWriteExt},
};
use tracing::debug;

use crate::errors::ServiceError;

/// URL prefix under which stored files are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

const SUFFIX_LEN: usize = 6;

/// Writes uploaded payloads into a single flat directory and hands back
/// the public path (`/uploads/<name>`) that gets persisted in the records.
///
/// Stored files are never removed; deleting a record leaves its file behind.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `upload_<unix-nanos>_<6 alphanumerics><ext>`, where `<ext>` is the
    /// extension of `original` including its dot, or empty.
    pub fn generate_name(original: &str) -> String {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SUFFIX_LEN)
            .map(char::from)
            .collect();
        format!("upload_{nanos}_{suffix}{}", extension_of(original))
    }

    /// Copy `reader` to a freshly named file and return its public path.
    pub async fn save<R>(&self, reader: &mut R, original_filename: &str) -> Result<String, ServiceError>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        fs::create_dir_all(&self.root).await?;
        let name = Self::generate_name(original_filename);
        let mut file = fs::File::create(self.root.join(&name)).await?;
        let bytes = io::copy(reader, &mut file).await?;
        file.flush().await?;
        debug!(file = %name, bytes, "stored upload");
        Ok(format!("{PUBLIC_PREFIX}/{name}"))
    }
}

// Client names may carry directories (either separator); only the last
// component's extension is kept, and only when it is plain ASCII alphanumerics.
fn extension_of(original: &str) -> String {
    let base = original.rsplit(|c| c == '/' || c == '\\').next().unwrap_or_default();
    match base.rfind('.') {
        Some(dot) if dot + 1 < base.len() => {
            let ext = &base[dot + 1..];
            if ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                format!(".{ext}")
            } else {
                String::new()
            }
        }
        _ => String::new(),
    }
}
