//! Filesystem probing: existence checks and directory listings.
//!
//! Absence is a normal outcome, never an error; callers probe optional
//! directories with [FsProbe::exists] before listing them. A listing fails
//! only on a genuine read failure (permissions, or an injected fault in the
//! in-memory implementation).

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio_stream::wrappers::ReadDirStream;
use tokio_stream::StreamExt;

/// A directory that exists but could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to read directory '{path}': {reason}")]
pub struct ProbeError {
    pub path: String,
    pub reason: String,
}

impl ProbeError {
    pub fn new(path: &Path, reason: impl Into<String>) -> Self {
        ProbeError {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }
}

/// Filesystem access capability consumed by the check steps. Implemented by
/// [DiskProbe] for real runs and [MemoryProbe] for tests and benches.
#[async_trait]
pub trait FsProbe: Send + Sync {
    /// True when a file or directory exists at `path`. Never fails.
    async fn exists(&self, path: &Path) -> bool;

    /// Entry names directly inside `path`, sorted ascending so sequential
    /// steps have a deterministic discovery order.
    async fn list_dir(&self, path: &Path) -> Result<Vec<String>, ProbeError>;
}

/// Probe backed by the real filesystem via `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskProbe;

#[async_trait]
impl FsProbe for DiskProbe {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn list_dir(&self, path: &Path) -> Result<Vec<String>, ProbeError> {
        let read_dir = tokio::fs::read_dir(path)
            .await
            .map_err(|err| ProbeError::new(path, err.to_string()))?;
        let mut entries = ReadDirStream::new(read_dir);
        let mut names = Vec::new();
        while let Some(entry) = entries.next().await {
            let entry = entry.map_err(|err| ProbeError::new(path, err.to_string()))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

/// In-memory tree for tests and benches. Registering a file or directory
/// also registers every ancestor directory, so a tree is described by its
/// leaves. Read faults can be injected per directory to exercise the
/// isolation guarantees of the checks.
#[derive(Debug, Clone, Default)]
pub struct MemoryProbe {
    dirs: BTreeMap<PathBuf, BTreeSet<String>>,
    files: BTreeSet<PathBuf>,
    faults: BTreeMap<PathBuf, String>,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.register_ancestors(&path);
        self.files.insert(path);
    }

    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.register_ancestors(&path);
        self.dirs.entry(path).or_default();
    }

    /// Make every `list_dir` of `path` fail with `reason`. The directory is
    /// still registered, so `exists` keeps returning true.
    pub fn inject_fault(&mut self, path: impl AsRef<Path>, reason: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        self.add_dir(&path);
        self.faults.insert(path, reason.into());
    }

    fn register_ancestors(&mut self, path: &Path) {
        let mut child = path.to_path_buf();
        while let Some(parent) = child.parent().map(Path::to_path_buf) {
            if parent.as_os_str().is_empty() {
                break;
            }
            if let Some(name) = child.file_name() {
                self.dirs
                    .entry(parent.clone())
                    .or_default()
                    .insert(name.to_string_lossy().into_owned());
            }
            child = parent;
        }
    }
}

#[async_trait]
impl FsProbe for MemoryProbe {
    async fn exists(&self, path: &Path) -> bool {
        self.files.contains(path) || self.dirs.contains_key(path)
    }

    async fn list_dir(&self, path: &Path) -> Result<Vec<String>, ProbeError> {
        if let Some(reason) = self.faults.get(path) {
            return Err(ProbeError::new(path, reason.clone()));
        }
        match self.dirs.get(path) {
            Some(entries) => Ok(entries.iter().cloned().collect()),
            None => Err(ProbeError::new(path, "no such directory")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_probe_registers_ancestors() {
        let mut probe = MemoryProbe::new();
        probe.add_file("/repo/blockchains/ethereum/info/logo.png");

        assert!(probe.exists(Path::new("/repo")).await);
        assert!(probe.exists(Path::new("/repo/blockchains/ethereum")).await);
        assert!(
            probe
                .exists(Path::new("/repo/blockchains/ethereum/info/logo.png"))
                .await
        );
        assert!(!probe.exists(Path::new("/repo/blockchains/bitcoin")).await);

        let entries = probe
            .list_dir(Path::new("/repo/blockchains/ethereum"))
            .await
            .expect("listing should succeed");
        assert_eq!(entries, vec!["info".to_string()]);
    }

    #[tokio::test]
    async fn memory_probe_lists_sorted() {
        let mut probe = MemoryProbe::new();
        probe.add_file("/repo/zeta.txt");
        probe.add_file("/repo/alpha.txt");
        probe.add_dir("/repo/middle");

        let entries = probe
            .list_dir(Path::new("/repo"))
            .await
            .expect("listing should succeed");
        assert_eq!(entries, vec!["alpha.txt", "middle", "zeta.txt"]);
    }

    #[tokio::test]
    async fn memory_probe_injected_fault_fails_listing() {
        let mut probe = MemoryProbe::new();
        probe.add_file("/repo/ok/file");
        probe.inject_fault("/repo/bad", "permission denied");

        assert!(probe.exists(Path::new("/repo/bad")).await);
        let err = probe
            .list_dir(Path::new("/repo/bad"))
            .await
            .expect_err("fault should surface");
        assert!(err.to_string().contains("permission denied"));
        assert!(probe.list_dir(Path::new("/repo/ok")).await.is_ok());
    }

    #[tokio::test]
    async fn missing_directory_listing_is_an_error() {
        let probe = MemoryProbe::new();
        assert!(!probe.exists(Path::new("/nowhere")).await);
        assert!(probe.list_dir(Path::new("/nowhere")).await.is_err());
    }
}
