//! Template catalog: types, upgrade reconciliation, and queries.

mod catalog;
mod reconcile;
mod types;

pub use catalog::{find, names_by_category};
pub use reconcile::reconcile;
pub use types::{ModelCategory, ModelSpec, Template, TemplateGroup};
