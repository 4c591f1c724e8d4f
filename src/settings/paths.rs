//! Path resolution for the settings store.

use crate::constants::{BACKUP_SUFFIX, DEFAULTS_FILE, SETTINGS_FILE};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// On-disk locations of the user settings file and the shipped-defaults file.
#[derive(Debug, Clone)]
pub struct StorePaths {
    /// The live, user-owned settings file.
    pub user_file: PathBuf,
    /// The shipped-defaults file placed by the installer, if any.
    pub shipped_defaults: PathBuf,
}

impl StorePaths {
    /// Create paths explicitly. Used by tests and by embedders with their
    /// own layout.
    pub fn new(user_file: impl Into<PathBuf>, shipped_defaults: impl Into<PathBuf>) -> Self {
        Self {
            user_file: user_file.into(),
            shipped_defaults: shipped_defaults.into(),
        }
    }

    /// Resolve the standard locations for `app_name`.
    ///
    /// The user file lives in the platform config directory:
    /// - Linux: `~/.config/{app_name}/settings.toml`
    /// - macOS: `~/Library/Application Support/{app_name}/settings.toml`
    /// - Windows: `%APPDATA%\{app_name}\settings.toml`
    ///
    /// The shipped-defaults file is expected beside the executable, where the
    /// installer places it.
    pub fn discover(app_name: &str) -> Result<Self> {
        let config_dir = ProjectDirs::from("", "", app_name)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(Error::ConfigDirNotFound)?;

        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            user_file: config_dir.join(SETTINGS_FILE),
            shipped_defaults: exe_dir.join(DEFAULTS_FILE),
        })
    }
}

/// Sibling path with the backup suffix appended
/// (`settings.toml` becomes `settings.toml.backup`).
pub fn backup_path(path: &Path) -> PathBuf {
    sibling_with_suffix(path, BACKUP_SUFFIX)
}

/// Sibling path with an extra dot-suffix appended to the file name.
pub(crate) fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(OsString::new, OsString::from);
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}
