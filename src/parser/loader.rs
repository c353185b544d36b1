//! Text loading for BLM files
//!
//! The parser only needs the decoded text of a file. Loading is behind the
//! [`TextLoader`] trait so feeds can come from disk, memory or elsewhere.

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Source of decoded file contents
pub trait TextLoader: Send + Sync {
    /// Return the full text of `path`
    fn load(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send;
}

/// Loads files from the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FsLoader {
    lossy_utf8: bool,
}

impl FsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace invalid UTF-8 with U+FFFD instead of failing
    pub fn lossy(mut self, lossy_utf8: bool) -> Self {
        self.lossy_utf8 = lossy_utf8;
        self
    }
}

impl TextLoader for FsLoader {
    async fn load(&self, path: &Path) -> io::Result<String> {
        let bytes = tokio::fs::read(path).await?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) if self.lossy_utf8 => {
                warn!(
                    "{} is not valid UTF-8 (first bad byte at {}), decoding lossily",
                    path.display(),
                    e.utf8_error().valid_up_to()
                );
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
            Err(e) => Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        }
    }
}

/// Serves file contents from memory, keyed by path
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<PathBuf, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }
}

impl TextLoader for MemoryLoader {
    async fn load(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no in-memory file at {}", path.display()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_fs_loader_reads_text() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "#HEADER#").unwrap();

        let text = FsLoader::new().load(file.path()).await.unwrap();
        assert_eq!(text, "#HEADER#");
    }

    #[tokio::test]
    async fn test_fs_loader_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"caf\xe9").unwrap();

        let strict = FsLoader::new().load(file.path()).await;
        assert_eq!(strict.unwrap_err().kind(), io::ErrorKind::InvalidData);

        let lossy = FsLoader::new().lossy(true).load(file.path()).await.unwrap();
        assert_eq!(lossy, "caf\u{FFFD}");
    }

    #[tokio::test]
    async fn test_fs_loader_missing_file() {
        let result = FsLoader::new()
            .load(Path::new("/definitely/not/here.blm"))
            .await;
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_memory_loader() {
        let loader = MemoryLoader::new().with_file("a.blm", "text");

        assert_eq!(loader.load(Path::new("a.blm")).await.unwrap(), "text");
        assert!(loader.load(Path::new("b.blm")).await.is_err());
    }
}
