//! Node-edit session management.
//!
//! This module tracks a single node while its properties are being edited:
//! - Intake of backend property declarations
//! - Reconciliation once the widget configuration arrives
//! - Output schema maintenance as the user edits

pub mod backend;
pub mod edit_session;

pub use backend::apply_backend_properties;
pub use edit_session::EditSession;
