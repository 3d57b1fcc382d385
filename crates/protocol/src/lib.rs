//! # hk-protocol
//!
//! Core protocol definitions and data models for hydrator-kit.
//!
//! This crate defines all shared data structures used for:
//! - Plugin descriptors fetched from the backend and widget configurations
//! - Pipeline nodes and their property bags
//! - Output schema rows and the serialized record envelope
//! - Edit-session messages exchanged with the browser host
//!
//! ## Modules
//!
//! - [`descriptor_models`]: Backend property descriptors and widget configs
//! - [`node_models`]: Pipeline nodes and property patches
//! - [`reconcile_models`]: Presentation-ready groups produced by reconciliation
//! - [`schema_models`]: Output schema fields, editor rows and record envelope
//! - [`ipc`]: Operations and Events for the node-edit session
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, and uuid
//! - TypeScript generation: Types sent to the host derive `TS`
//! - Independent compilation: No dependencies on other hydrator-kit crates

pub mod descriptor_models;
pub mod ipc;
pub mod node_models;
pub mod reconcile_models;
pub mod schema_models;

// Re-export all public types for convenience
pub use descriptor_models::*;
pub use ipc::*;
pub use node_models::*;
pub use reconcile_models::*;
pub use schema_models::*;
