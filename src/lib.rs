//! Prefstore - crash-safe settings persistence for ML inference applications.
//!
//! This crate owns an application's configuration file: user preferences plus
//! a catalog of reusable templates (named presets for model configurations).
//! It carries both across application upgrades without discarding user
//! customizations, and never leaves the file in a half-written state.
//!
//! The load path detects the install state from which files exist on disk
//! (fresh install, upgrade in place, normal run), reconciles a freshly
//! shipped defaults document against the user's existing one field by field,
//! reconciles the template catalog by stable identity, and persists results
//! with atomic temp-file-and-rename writes.
//!
//! ```no_run
//! use prefstore::settings::{SettingsStore, StorePaths};
//!
//! # fn main() -> prefstore::Result<()> {
//! let store = SettingsStore::open(StorePaths::discover("myapp")?);
//! let settings = store.load()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod settings;
pub mod templates;

pub use error::{Error, Result};
