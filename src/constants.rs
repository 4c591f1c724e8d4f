//! Crate-wide constants.

/// Name of the section that holds the settings document inside the shared
/// configuration file. Sibling sections belong to other subsystems and are
/// preserved verbatim on save.
pub const SETTINGS_SECTION: &str = "settings";

/// User settings file name inside the platform config directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Shipped-defaults file name, placed beside the executable by the installer.
pub const DEFAULTS_FILE: &str = "defaults.toml";

/// Suffix appended to backup copies and to the retired shipped-defaults file.
pub const BACKUP_SUFFIX: &str = "backup";

/// Suffix of the temporary sibling used during atomic writes.
pub const TMP_SUFFIX: &str = "tmp";

/// Schema version this crate reads and writes.
///
/// Bumped whenever the shape of the settings section changes incompatibly.
/// A version mismatch between a shipped-defaults document and a user document
/// disables field-level merging entirely.
pub const SCHEMA_VERSION: u32 = 3;

/// Default number of entries kept in the recent-files list.
pub const DEFAULT_RECENT_LIMIT: u32 = 10;

/// Default base URL for preset and model downloads.
pub const DEFAULT_DOWNLOAD_MIRROR: &str = "https://models.prefstore.dev";
