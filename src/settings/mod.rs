//! Settings document loading, merging, and persistence.

mod loader;
mod merge;
mod paths;
mod store;
mod types;

pub use loader::{InstallState, SettingsStore, detect_install_state};
pub use merge::{Merged, merge};
pub use paths::{StorePaths, backup_path};
pub use store::{backup_file, load_document, save_document};
pub use types::{DevicePreference, FIELDS, FieldAuthority, FieldSpec, Settings, UiSettings};
