//! # hk-core
//!
//! Plugin property reconciliation and output schema derivation for
//! hydrator-kit.
//!
//! This crate provides:
//! - Configuration loading from the `.hydrator/` directory
//! - Reconciliation of widget configs with backend-declared properties
//! - Output schema normalization, padding, serialization and validation
//! - Node-edit sessions driven by host operations
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and widget registry
//! - [`reconcile`]: Grouping backend properties for display
//! - [`schema`]: Output schema builder, edge schemas and validation
//! - [`session`]: Edit session state and backend property intake

pub mod config;
pub mod reconcile;
pub mod schema;
pub mod session;
