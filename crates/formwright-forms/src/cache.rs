//! Render cache state machine.
//!
//! A form configured with a cache filename can skip its whole pipeline when
//! a previously rendered artifact exists. The artifact is an opaque byte blob
//! stored under `directory + filename`; the key is supplied by the caller and
//! never derived from the form's content.
//!
//! ```text
//!             artifact absent            artifact present
//!   off ─────────────────────▶ primed ─────────────────────▶ complete
//!    ▲                           │ render persisted              │
//!    │                           └──────────────────────────────▶│
//!    └──── clear (artifact deleted) ◀── clear requested ◀────────┘
//! ```
//!
//! Storage is not locked: two requests that both see no artifact both render
//! and both write, and the last write wins.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use formwright_core::{FormwrightError, FormwrightResult};

/// The state of the render cache for one form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Caching is not in effect; render normally and persist nothing.
    Off,
    /// No artifact exists yet; render normally and persist the output.
    Primed,
    /// An artifact exists; skip the pipeline and serve it verbatim.
    Complete,
    /// Delete any existing artifact and render fresh.
    Clear,
}

impl fmt::Display for CacheState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "off",
            Self::Primed => "primed",
            Self::Complete => "complete",
            Self::Clear => "clear",
        };
        f.write_str(name)
    }
}

/// Byte storage for cache artifacts.
///
/// Locations are full paths (`directory + filename`).
pub trait ArtifactStore: Send + Sync {
    /// Returns `true` if an artifact exists at `location`.
    fn exists(&self, location: &Path) -> bool;

    /// Reads the full artifact at `location`.
    fn read(&self, location: &Path) -> FormwrightResult<Vec<u8>>;

    /// Overwrites the artifact at `location`.
    fn write(&self, location: &Path, bytes: &[u8]) -> FormwrightResult<()>;

    /// Deletes the artifact at `location`. Deleting a missing artifact is not an error.
    fn delete(&self, location: &Path) -> FormwrightResult<()>;

    /// Returns `true` if artifacts can be written into `directory`.
    fn is_writable(&self, directory: &Path) -> bool;
}

/// Filesystem-backed artifact storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl ArtifactStore for FileStore {
    fn exists(&self, location: &Path) -> bool {
        location.is_file()
    }

    fn read(&self, location: &Path) -> FormwrightResult<Vec<u8>> {
        Ok(fs::read(location)?)
    }

    fn write(&self, location: &Path, bytes: &[u8]) -> FormwrightResult<()> {
        Ok(fs::write(location, bytes)?)
    }

    fn delete(&self, location: &Path) -> FormwrightResult<()> {
        match fs::remove_file(location) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Creates and drops a scratch file; mode bits alone miss ownership.
    fn is_writable(&self, directory: &Path) -> bool {
        directory.is_dir() && tempfile::NamedTempFile::new_in(directory).is_ok()
    }
}

/// In-memory artifact storage, useful for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    artifacts: RwLock<HashMap<PathBuf, Vec<u8>>>,
    read_only: bool,
}

impl MemoryStore {
    /// Creates an empty, writable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that reports every directory as unwritable.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Returns the number of stored artifacts.
    pub fn len(&self) -> usize {
        self.artifacts.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if no artifacts are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ArtifactStore for MemoryStore {
    fn exists(&self, location: &Path) -> bool {
        self.artifacts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(location)
    }

    fn read(&self, location: &Path) -> FormwrightResult<Vec<u8>> {
        self.artifacts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(location)
            .cloned()
            .ok_or_else(|| {
                FormwrightError::Cache(format!("no artifact at '{}'", location.display()))
            })
    }

    fn write(&self, location: &Path, bytes: &[u8]) -> FormwrightResult<()> {
        if self.read_only {
            return Err(FormwrightError::Cache(format!(
                "store is read-only, cannot write '{}'",
                location.display()
            )));
        }
        self.artifacts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn delete(&self, location: &Path) -> FormwrightResult<()> {
        self.artifacts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(location);
        Ok(())
    }

    fn is_writable(&self, _directory: &Path) -> bool {
        !self.read_only
    }
}

/// Tracks the cache state of one form and performs its storage side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheMachine {
    state: CacheState,
    location: Option<PathBuf>,
}

impl CacheMachine {
    /// Creates a machine for the given artifact location. Without a location
    /// the machine stays [`CacheState::Off`] forever.
    pub const fn new(location: Option<PathBuf>) -> Self {
        Self {
            state: CacheState::Off,
            location,
        }
    }

    /// Returns the current state.
    pub const fn state(&self) -> CacheState {
        self.state
    }

    /// Returns the artifact location, if caching is configured.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Returns `true` once an artifact is being served instead of rendering.
    pub fn is_complete(&self) -> bool {
        self.state == CacheState::Complete
    }

    /// Requests that any existing artifact be deleted on the next evaluation.
    pub fn request_clear(&mut self) {
        if self.location.is_some() {
            self.state = CacheState::Clear;
        }
    }

    /// Turns caching off for this pass, e.g. because the directory is not writable.
    pub fn disable(&mut self) {
        self.state = CacheState::Off;
    }

    /// Decides the state from the presence of an artifact.
    ///
    /// - no location configured: `off`
    /// - artifact present, clear requested: artifact deleted, `off`
    /// - artifact present otherwise: `complete`
    /// - artifact absent: `primed`
    pub fn evaluate(&mut self, store: &dyn ArtifactStore) -> FormwrightResult<CacheState> {
        let Some(location) = self.location.as_deref() else {
            self.state = CacheState::Off;
            return Ok(self.state);
        };

        let next = if store.exists(location) {
            if self.state == CacheState::Clear {
                store.delete(location)?;
                tracing::debug!(location = %location.display(), "cleared cache artifact");
                CacheState::Off
            } else {
                CacheState::Complete
            }
        } else {
            CacheState::Primed
        };
        tracing::debug!(from = %self.state, to = %next, "cache transition");
        self.state = next;
        Ok(next)
    }

    /// Reads the artifact when the state is `complete`.
    pub fn load(&self, store: &dyn ArtifactStore) -> FormwrightResult<Option<Vec<u8>>> {
        match (self.state, self.location.as_deref()) {
            (CacheState::Complete, Some(location)) => store.read(location).map(Some),
            _ => Ok(None),
        }
    }

    /// Persists freshly rendered output when the state is `primed`.
    ///
    /// After a successful write the state becomes `complete`, so a later render
    /// through the same machine serves the artifact. Returns `true` if the
    /// output was written.
    pub fn persist(&mut self, store: &dyn ArtifactStore, bytes: &[u8]) -> FormwrightResult<bool> {
        let Some(location) = self.location.as_deref() else {
            return Ok(false);
        };
        if self.state != CacheState::Primed {
            return Ok(false);
        }
        store.write(location, bytes)?;
        tracing::info!(location = %location.display(), bytes = bytes.len(), "persisted cache artifact");
        self.state = CacheState::Complete;
        Ok(true)
    }
}
