//! Reconciliation of widget configurations with backend properties.
//!
//! The backend decides which properties exist; the widget configuration
//! decides how they are grouped and displayed. Reconciliation shows every
//! backend property exactly once, in the configured group when there is one
//! and in a trailing `generic` group otherwise.

pub mod reconciler;

pub use reconciler::{SchemaReconciler, GENERIC_GROUP};
