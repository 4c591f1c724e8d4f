//! Install-state detection and the settings load state machine.
//!
//! The loader decides, from which files exist on disk, whether this run is a
//! fresh install, an upgrade, or a normal start, and drives the persister and
//! the merger accordingly. The guiding policy is reset over refusal to start:
//! a running application needs a valid configuration, so an unreadable user
//! file is replaced by shipped defaults rather than reported as fatal.

use crate::error::{Error, Result};
use crate::settings::merge;
use crate::settings::paths::{StorePaths, backup_path};
use crate::settings::store;
use crate::settings::types::Settings;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Derived install state, computed from file presence. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    /// Shipped defaults present, no user file yet: first run after installation.
    FreshInstall,
    /// Both files present: first run after an upgrade.
    UpgradeInPlace,
    /// Only the user file present: normal run.
    AlreadyInstalled,
    /// Neither file present: nothing to load from.
    Unrecoverable,
}

/// Determine the install state from which files exist.
pub fn detect_install_state(paths: &StorePaths) -> InstallState {
    match (paths.shipped_defaults.exists(), paths.user_file.exists()) {
        (true, false) => InstallState::FreshInstall,
        (true, true) => InstallState::UpgradeInPlace,
        (false, true) => InstallState::AlreadyInstalled,
        (false, false) => InstallState::Unrecoverable,
    }
}

/// Handle to the settings files. The entry point collaborators use to load
/// and save the configuration.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    paths: StorePaths,
}

impl SettingsStore {
    /// Create a store over the given paths.
    pub fn open(paths: StorePaths) -> Self {
        Self { paths }
    }

    /// The paths this store operates on.
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Load the current settings, reconciling shipped defaults on the first
    /// run after an install or upgrade.
    ///
    /// Fails with [`Error::NoConfiguration`] only when neither a shipped
    /// defaults file nor a user file exists. Any other failure falls back to
    /// a fresh copy of the shipped defaults.
    ///
    /// Whatever the outcome, the shipped-defaults file is retired (renamed
    /// to its `.backup` sibling) so subsequent runs load the user file
    /// directly. The retirement is best-effort.
    pub fn load(&self) -> Result<Settings> {
        let result = self.load_inner();
        self.retire_shipped_defaults();
        result
    }

    /// Persist `settings` to the user file, preserving sibling sections.
    ///
    /// Called by settings-editing flows after the user commits a change;
    /// callers validate field semantics before calling. The write is atomic:
    /// on failure the previous file remains valid.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        store::save_document(&self.paths.user_file, settings)
    }

    fn load_inner(&self) -> Result<Settings> {
        let state = detect_install_state(&self.paths);
        debug!(?state, "loading settings");

        let loaded = match state {
            InstallState::FreshInstall => self.install_defaults(),
            InstallState::UpgradeInPlace => self.upgrade(),
            InstallState::AlreadyInstalled => store::load_document(&self.paths.user_file),
            InstallState::Unrecoverable => {
                return Err(Error::NoConfiguration {
                    user: self.paths.user_file.clone(),
                    shipped: self.paths.shipped_defaults.clone(),
                });
            }
        };

        match loaded {
            Ok(settings) => Ok(settings),
            Err(cause) => self.reset_to_defaults(cause),
        }
    }

    /// Fresh install: the shipped file verbatim becomes the user file.
    fn install_defaults(&self) -> Result<Settings> {
        info!(
            from = %self.paths.shipped_defaults.display(),
            to = %self.paths.user_file.display(),
            "fresh install: adopting shipped defaults"
        );
        copy_over(&self.paths.shipped_defaults, &self.paths.user_file)?;
        store::load_document(&self.paths.user_file)
    }

    /// Upgrade in place: merge the shipped document into the user's and
    /// persist the result.
    fn upgrade(&self) -> Result<Settings> {
        let current = store::load_document(&self.paths.user_file)?;
        let defaults = store::load_document(&self.paths.shipped_defaults)?;

        let merged = merge::merge(&current, &defaults);
        if merged.schema_reset {
            warn!(
                from = current.schema_version,
                to = defaults.schema_version,
                "schema version changed; resetting settings to shipped defaults"
            );
            store::backup_file(&self.paths.user_file);
        } else {
            info!("upgrade: merged shipped defaults into user settings");
        }

        self.save(&merged.settings)?;
        Ok(merged.settings)
    }

    /// Reset-over-refusal fallback: overwrite the user file with shipped
    /// defaults and reload. Prefers the live shipped file; falls back to its
    /// retired `.backup` copy. With neither present, the original failure
    /// propagates.
    fn reset_to_defaults(&self, cause: Error) -> Result<Settings> {
        let Some(source) = self.defaults_source() else {
            return Err(cause);
        };

        warn!(error = %cause, "settings unusable; resetting to shipped defaults");
        copy_over(&source, &self.paths.user_file)?;
        store::load_document(&self.paths.user_file)
    }

    fn defaults_source(&self) -> Option<PathBuf> {
        if self.paths.shipped_defaults.exists() {
            return Some(self.paths.shipped_defaults.clone());
        }
        let retired = backup_path(&self.paths.shipped_defaults);
        retired.exists().then_some(retired)
    }

    /// One-shot retirement of the shipped-defaults file. Renaming it means
    /// later runs are `AlreadyInstalled`, so install and upgrade handling
    /// happen exactly once per shipped version. Best-effort: failure is
    /// logged and ignored.
    fn retire_shipped_defaults(&self) {
        let shipped = &self.paths.shipped_defaults;
        if !shipped.exists() {
            return;
        }
        let dest = backup_path(shipped);
        match fs::rename(shipped, &dest) {
            Ok(()) => debug!(to = %dest.display(), "retired shipped-defaults file"),
            Err(e) => warn!(path = %shipped.display(), "failed to retire shipped-defaults file: {e}"),
        }
    }
}

/// Copy `from` over `to`, creating parent directories as needed.
fn copy_over(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::SettingsWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::copy(from, to)
        .map(|_| ())
        .map_err(|e| Error::SettingsWrite {
            path: to.to_path_buf(),
            source: e,
        })
}
