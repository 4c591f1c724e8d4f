//! Error types for prefstore.

/// Result type alias for prefstore operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for prefstore.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither a shipped-defaults file nor a user settings file exists.
    #[error("no settings source found: neither '{user}' nor '{shipped}' exists")]
    NoConfiguration {
        /// Path checked for the user settings file.
        user: std::path::PathBuf,
        /// Path checked for the shipped-defaults file.
        shipped: std::path::PathBuf,
    },

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read a settings file.
    #[error("failed to read settings file '{path}'")]
    SettingsRead {
        /// Path to the settings file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a settings file as a TOML document.
    #[error("failed to parse settings file '{path}'")]
    SettingsParse {
        /// Path to the settings file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// The document parsed but does not contain the settings section.
    #[error("section '{section}' missing from '{path}'")]
    SectionMissing {
        /// Name of the missing section.
        section: String,
        /// Path to the settings file.
        path: std::path::PathBuf,
    },

    /// The settings section is present but not of the expected shape.
    #[error("invalid settings section in '{path}'")]
    SettingsDecode {
        /// Path to the settings file.
        path: std::path::PathBuf,
        /// Underlying decode error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write a settings file.
    #[error("failed to write settings file '{path}'")]
    SettingsWrite {
        /// Path to the settings file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize settings.
    #[error("failed to serialize settings")]
    SettingsSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },
}
