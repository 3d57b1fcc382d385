//! Output schema derivation.
//!
//! - [`builder`]: Normalizes raw fields, pads editor rows and serializes
//!   the record envelope
//! - [`field_type`]: Raw JSON field types as a tagged variant
//! - [`fixed`]: Built-in schemas implied by a watched property value
//! - [`edge`]: Schema flowing out of a node onto a connection
//! - [`validate`]: Non-blocking checks on a serialized schema

pub mod builder;
pub mod edge;
pub mod error;
pub mod field_type;
pub mod fixed;
pub mod validate;

pub use builder::{parse_fields, serialize_rows, OutputSchemaBuilder, MIN_EDITOR_ROWS};
pub use edge::{edge_schema, schema_on_edge};
pub use error::{SchemaError, SchemaResult};
pub use field_type::FieldType;
pub use fixed::FixedSchemas;
pub use validate::validate_schema;
