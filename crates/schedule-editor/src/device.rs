//! Remote store contract for pushing schedules to, and pulling them from, a device.
//!
//! The editor never opens a transport itself. It only needs to read and write a
//! named text file and to pause the device runtime while a file is replaced.
//! Failures are reported to the caller; nothing here retries.

use std::path::{Path, PathBuf};

use schedule_model::{deserialize_collection, ScheduleCollection};
use tracing::{info, warn};

use crate::error::{EditorError, Result};

/// File operations a device must support.
pub trait RemoteStore {
    /// Read `name` as text. `Ok(None)` when the file does not exist.
    fn read_file(&mut self, name: &str) -> Result<Option<String>>;

    /// Create or replace `name` with `contents`.
    fn write_file(&mut self, name: &str, contents: &str) -> Result<()>;

    fn is_runtime_enabled(&mut self) -> Result<bool>;

    fn set_runtime_enabled(&mut self, enabled: bool) -> Result<()>;
}

/// Marker file whose presence means the runtime is paused.
pub const RUNTIME_DISABLED_MARKER: &str = ".runtime-disabled";

/// A [`RemoteStore`] backed by a local directory, such as a mounted device
/// filesystem.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn io_error(path: PathBuf) -> impl FnOnce(std::io::Error) -> EditorError {
        move |source| EditorError::Io { path, source }
    }
}

impl RemoteStore for DirectoryStore {
    fn read_file(&mut self, name: &str) -> Result<Option<String>> {
        let path = self.root.join(name);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(path)(e)),
        }
    }

    fn write_file(&mut self, name: &str, contents: &str) -> Result<()> {
        let path = self.root.join(name);
        std::fs::write(&path, contents).map_err(Self::io_error(path))
    }

    fn is_runtime_enabled(&mut self) -> Result<bool> {
        if !self.root.is_dir() {
            return Err(EditorError::Device(format!(
                "device root {} is not a directory",
                self.root.display()
            )));
        }
        Ok(!self.root.join(RUNTIME_DISABLED_MARKER).exists())
    }

    fn set_runtime_enabled(&mut self, enabled: bool) -> Result<()> {
        let marker = self.root.join(RUNTIME_DISABLED_MARKER);
        if enabled {
            match std::fs::remove_file(&marker) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                    Err(Self::io_error(marker)(e))
                }
                _ => Ok(()),
            }
        } else {
            std::fs::write(&marker, b"").map_err(Self::io_error(marker))
        }
    }
}

/// Read and decode the collection stored as `name` on the device.
///
/// A missing or empty file is an error.
pub fn pull(store: &mut dyn RemoteStore, name: &str) -> Result<ScheduleCollection> {
    let text = store
        .read_file(name)?
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| EditorError::MissingRemoteFile(name.to_string()))?;
    let collection = deserialize_collection(&text)?;
    info!(file = name, schedules = collection.schedules.len(), "pulled schedules from device");
    Ok(collection)
}

/// Write `text` to the device as `name` with the runtime paused.
///
/// The runtime is re-enabled afterwards even when the write fails.
pub fn push(store: &mut dyn RemoteStore, name: &str, text: &str) -> Result<()> {
    if store.is_runtime_enabled()? {
        store.set_runtime_enabled(false)?;
    }

    let written = store.write_file(name, text);
    let restored = store.set_runtime_enabled(true);

    if let Err(e) = &written {
        warn!(file = name, error = %e, "failed to write schedules to device");
    }
    written?;
    restored?;
    info!(file = name, bytes = text.len(), "pushed schedules to device");
    Ok(())
}
