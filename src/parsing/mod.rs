//! Schema graph building
//!
//! Recursive-descent parsing of the raw schema table into the shared IR
//! graph: `$ref` resolution with fallbacks, composition merging, nullability
//! derivation, and cycle/depth guarding. Nothing in here is fatal; malformed
//! input degrades to placeholder nodes plus warnings.

pub mod all_of;
pub mod context;
pub mod ref_resolver;
pub mod schema_parser;
pub mod type_parser;

pub use context::ParsingContext;
pub use schema_parser::parse_schema;
