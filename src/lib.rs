//! Schema Loom
//!
//! Schema resolution and type inference for OpenAPI documents: turns
//! `components.schemas` into a navigable IR graph and maps each node to a
//! Python type expression plus the imports it needs.
//!
//! ## Features
//!
//! - **Recursive Resolution**: `$ref` chains, compositions, and inline
//!   objects collapse into one shared node graph
//! - **Cycle Safety**: self-referential schemas terminate with placeholder
//!   nodes and a recorded cycle path, never with a stack overflow
//! - **Graceful Degradation**: missing refs, unknown types, and malformed
//!   schemas become placeholders plus warnings instead of hard failures
//! - **Type Inference**: an ordered resolver chain produces `Optional`,
//!   `Union`, `List`, and `Dict` expressions with import tracking
//! - **Inline Promotion**: anonymous objects are lifted into named models
//!   derived from their use site
//! - **Cycle Diagnostics**: strongly connected components of the reference
//!   graph, for emitters that need forward declarations
//!
//! ## Architecture
//!
//! ```text
//! document (JSON/YAML)
//!     │  loader: preconditions, raw table, bundle hash
//!     ▼
//! parsing: raw nodes ──▶ SchemaNode graph (ParsingContext, cycle guard)
//!     │
//!     ▼
//! resolution: named ▶ composition ▶ primitive ▶ array ▶ object ▶ Any
//!     │                                   (ResolutionContext, ImportSink)
//!     ▼
//! type expression + imports          e.g. Optional[List[WidgetItem]]
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod ir;
pub mod loader;
pub mod names;
pub mod parsing;
pub mod raw;
pub mod resolution;
pub mod warnings;

pub use analysis::{CycleGroup, SccAnalysis};
pub use config::ResolveConfig;
pub use error::{Result, SpecError};
pub use ir::{AdditionalProperties, JsonType, SchemaIndex, SchemaNode, SchemaNodeRef};
pub use loader::{load_spec_file, load_spec_str, load_spec_value, IrGraph, SpecFormat};
pub use parsing::{parse_schema, ParsingContext};
pub use resolution::{ImportCollector, ImportSink, ResolutionContext, TypeEngine};
pub use warnings::{WarningCollector, WarningReport};
