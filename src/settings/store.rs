//! Owner of the current settings snapshot.

use super::Settings;
use crate::error::Result;
use crate::reconcile::ExclusionSet;
use crate::update::{load, update};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Holds the settings file's current [`Settings`] snapshot.
///
/// The snapshot is never mutated. A reload parses the file into a new
/// snapshot and swaps it in, so readers holding an older `Arc` keep a
/// complete, consistent view. The in-memory state always comes from
/// re-reading the file, never from the merged document directly.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    template: String,
    excluded: ExclusionSet,
    current: RwLock<Arc<Settings>>,
}

impl SettingsStore {
    /// Open the settings file at `path`, reconciling it first if allowed.
    ///
    /// The auto-update flag is read from the file as it is on disk before
    /// reconciliation, since reconciliation might change it. A missing file
    /// counts as allowed. Filesystem failures are logged and leave the store
    /// with an empty snapshot, so every option reads its default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfsyncError::MalformedDocument`](crate::error::ConfsyncError::MalformedDocument)
    /// if the file or the template does not parse.
    pub fn open(
        path: impl Into<PathBuf>,
        template: impl Into<String>,
        excluded: ExclusionSet,
    ) -> Result<Self> {
        let path = path.into();
        let template = template.into();

        let auto_update = match load(&path) {
            Ok(document) => Settings::new(document).auto_update_file(),
            Err(e) if e.is_io() => true,
            Err(e) => return Err(e),
        };

        if auto_update {
            update(&template, &path, &excluded)?;
        } else {
            info!(path = %path.display(), "automatic updates disabled, leaving settings file as is");
        }

        let settings = match load(&path) {
            Ok(document) => Settings::new(document),
            Err(e) if e.is_io() => {
                error!(error = %e, "could not load settings, using defaults");
                Settings::empty()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            path,
            template,
            excluded,
            current: RwLock::new(Arc::new(settings)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Settings> {
        self.current.read().clone()
    }

    /// Re-read the file and replace the snapshot.
    ///
    /// On failure the previous snapshot stays in place and `false` is
    /// returned.
    pub fn reload(&self) -> bool {
        match load(&self.path) {
            Ok(document) => {
                *self.current.write() = Arc::new(Settings::new(document));
                true
            }
            Err(e) => {
                warn!(error = %e, "reload failed, keeping previous settings");
                false
            }
        }
    }

    /// Reconcile the file against the template and reload it.
    ///
    /// Returns `false` without touching the file when the current snapshot
    /// has automatic updates turned off, or when any step fails.
    pub fn update_with_new_options(&self) -> bool {
        if !self.snapshot().auto_update_file() {
            return false;
        }

        match update(&self.template, &self.path, &self.excluded) {
            Ok(true) => self.reload(),
            Ok(false) => false,
            Err(e) => {
                error!(error = %e, "settings file could not be reconciled");
                false
            }
        }
    }
}
