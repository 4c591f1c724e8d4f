//! Identity-based reconciliation of the template catalog across upgrades.
//!
//! Templates are matched by stable `id`, never by position or field copy.
//! Shipped entries are authoritative for their own content; user-owned
//! entries survive unchanged. A shipped entry whose `file_version` moved is
//! taken as-is and flagged `update_available` so the caller can surface an
//! upgrade notice.

use super::types::{Template, TemplateGroup};

/// Reconcile the user's current catalog against the freshly shipped one.
///
/// The result contains every shipped entry (in shipped order, with
/// `update_available` adjusted per the rules below), followed by every
/// current entry with no shipped counterpart, in their prior relative order:
///
/// - matched, versions differ: the shipped entry wins and is flagged
///   `update_available` — prior edits to that builtin are discarded;
/// - matched, versions equal: the shipped entry is kept and the current
///   entry's `update_available` carries forward, preserving a notice the
///   user has not yet acknowledged;
/// - unmatched current entry: preserved. User-group entries are appended
///   unchanged; an orphaned builtin (no longer in the vendor catalog) is
///   preserved as user-created — only its `group` changes.
pub fn reconcile(current: &[Template], defaults: &[Template]) -> Vec<Template> {
    let mut merged: Vec<Template> = defaults.to_vec();

    for shipped in &mut merged {
        if let Some(ours) = current.iter().find(|t| t.id == shipped.id) {
            if ours.file_version == shipped.file_version {
                shipped.update_available = ours.update_available;
            } else {
                shipped.update_available = true;
            }
        }
    }

    for ours in current {
        if !defaults.iter().any(|t| t.id == ours.id) {
            let mut kept = ours.clone();
            if kept.group == TemplateGroup::Builtin {
                tracing::debug!(id = %kept.id, "builtin template no longer shipped; keeping as user template");
                kept.group = TemplateGroup::User;
            }
            merged.push(kept);
        }
    }

    merged
}
