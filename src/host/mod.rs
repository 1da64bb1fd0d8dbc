//! Host-environment capabilities the engine consumes.
//!
//! The engine never touches the filesystem directly: directory listings come
//! in through [`FileSystemProvider`], interactive text entry through
//! [`Prompter`]. Both are trait objects so tests can substitute scripted
//! fakes for the OS-backed implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;

use crate::core::error::CoreError;

/// One entry of a directory listing, as reported by the host.
#[derive(Debug, Clone)]
pub struct HostDirEntry {
    pub name: String,
    pub is_directory: bool,
    pub size: Option<u64>,
    pub modified: Option<DateTime<Utc>>,
}

/// Directory enumeration, implemented by the host environment.
///
/// A listing either succeeds completely or fails; the engine treats failure
/// as "no change" and keeps its previous tree.
#[async_trait]
pub trait FileSystemProvider: Send + Sync {
    async fn list_directory(&self, path: &Path) -> Result<Vec<HostDirEntry>, CoreError>;

    /// The checked-out branch of the repository at `path`, if the host can
    /// tell. Purely informational metadata; `None` is always acceptable.
    async fn read_git_branch(&self, _path: &Path) -> Option<String> {
        None
    }
}

/// Interactive single-line text entry, used for tag input. Returns `None`
/// on cancellation.
pub trait Prompter {
    fn prompt_for_text(&self, message: &str, default_value: &str) -> Option<String>;
}

/// The production provider, backed by `tokio::fs`.
///
/// Entries are sorted by name so a loaded tree has deterministic child order
/// regardless of what the OS returns.
pub struct OsFileSystem;

#[async_trait]
impl FileSystemProvider for OsFileSystem {
    async fn list_directory(&self, path: &Path) -> Result<Vec<HostDirEntry>, CoreError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|err| CoreError::Io(err, path.to_path_buf()))?;
        if !metadata.is_dir() {
            return Err(CoreError::NotADirectory(path.to_path_buf()));
        }

        let mut reader = tokio::fs::read_dir(path)
            .await
            .map_err(|err| CoreError::Io(err, path.to_path_buf()))?;

        let mut entries = Vec::new();
        loop {
            let entry = match reader.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(err) => return Err(CoreError::Io(err, path.to_path_buf())),
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            match entry.metadata().await {
                Ok(md) => entries.push(HostDirEntry {
                    is_directory: md.is_dir(),
                    size: md.is_file().then(|| md.len()),
                    modified: md.modified().ok().map(DateTime::<Utc>::from),
                    name,
                }),
                Err(err) => {
                    // An entry that vanished mid-listing is dropped, not fatal.
                    tracing::warn!("Skipping unreadable entry {:?} in {:?}: {}", name, path, err);
                }
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn read_git_branch(&self, path: &Path) -> Option<String> {
        let head = tokio::fs::read_to_string(path.join(".git").join("HEAD"))
            .await
            .ok()?;
        let head = head.trim();
        match head.strip_prefix("ref: refs/heads/") {
            Some(branch) => Some(branch.to_string()),
            // Detached HEAD: report the abbreviated commit hash.
            None => Some(head.chars().take(7).collect()),
        }
    }
}

/// Opens an entry with the OS default handler. Fire-and-forget: failures are
/// logged and never propagated.
pub fn open_entry(path: &Path) {
    if let Err(err) = open::that_detached(path) {
        tracing::warn!("Failed to open {:?}: {}", path, err);
    }
}

/// Reveals an entry by opening its containing directory.
pub fn reveal_entry(path: &Path) {
    let target = path.parent().unwrap_or(path);
    if let Err(err) = open::that_detached(target) {
        tracing::warn!("Failed to reveal {:?}: {}", path, err);
    }
}
