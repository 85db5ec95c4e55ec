//! Backing stores for the cached provider document
//!
//! A store holds exactly one document plus the time it was last written.
//! Every write replaces the whole document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// Raw cached body and its write time
#[derive(Debug, Clone, PartialEq)]
pub struct CachedDocument {
    /// Provider JSON, or `""` when the cache needs a refresh
    pub raw_body: String,
    pub last_written_at: DateTime<Utc>,
}

/// Single-document storage shared by every render
pub trait CacheStore {
    /// Reads the current document
    ///
    /// Returns `Ok(None)` when the backing resource has not been provisioned.
    fn read(&self) -> io::Result<Option<CachedDocument>>;

    /// Replaces the document with `content`
    fn write(&self, content: &str) -> io::Result<()>;

    /// Human-readable location for diagnostics
    fn describe(&self) -> String;
}

/// File-backed store using the file's modification time as the write time
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty cache file (and its directory) if none exists
    ///
    /// Returns `true` when a file was created. An existing file is left
    /// untouched.
    pub fn provision(&self) -> io::Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, "")?;
        Ok(true)
    }

    /// Sibling path a document is staged at before the rename
    ///
    /// Unique per process and per write, so concurrent renders never share one.
    fn staging_path(&self) -> PathBuf {
        static NEXT: AtomicU64 = AtomicU64::new(0);

        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.{}.tmp", process::id(), NEXT.fetch_add(1, Ordering::Relaxed)));
        self.path.with_file_name(name)
    }
}

impl CacheStore for FileStore {
    fn read(&self) -> io::Result<Option<CachedDocument>> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let last_written_at = DateTime::<Utc>::from(metadata.modified()?);
        let raw_body = String::from_utf8(fs::read(&self.path)?).unwrap_or_else(|_| {
            // Read as the empty sentinel so the next refresh overwrites it
            tracing::warn!(cache = %self.path.display(), "cache file is not valid UTF-8, treating as empty");
            String::new()
        });

        Ok(Some(CachedDocument {
            raw_body,
            last_written_at,
        }))
    }

    fn write(&self, content: &str) -> io::Result<()> {
        // Readers see the old or the new document, never a partial one
        let staging = self.staging_path();
        fs::write(&staging, content)?;
        fs::rename(&staging, &self.path).inspect_err(|_| {
            let _ = fs::remove_file(&staging);
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory store, mainly for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Option<CachedDocument>>,
}

impl MemoryStore {
    /// A provisioned store holding the empty sentinel
    pub fn new() -> Self {
        Self::with_document("", Utc::now())
    }

    /// A store that behaves like a missing cache file
    pub fn unprovisioned() -> Self {
        Self::default()
    }

    /// A store seeded with `content` written at `last_written_at`
    pub fn with_document(content: impl Into<String>, last_written_at: DateTime<Utc>) -> Self {
        Self {
            document: Mutex::new(Some(CachedDocument {
                raw_body: content.into(),
                last_written_at,
            })),
        }
    }

    /// Current document, if any
    pub fn snapshot(&self) -> Option<CachedDocument> {
        self.document.lock().clone()
    }
}

impl CacheStore for MemoryStore {
    fn read(&self) -> io::Result<Option<CachedDocument>> {
        Ok(self.document.lock().clone())
    }

    fn write(&self, content: &str) -> io::Result<()> {
        *self.document.lock() = Some(CachedDocument {
            raw_body: content.to_string(),
            last_written_at: Utc::now(),
        });
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory cache".to_string()
    }
}
