//! Spec document loading
//!
//! Reads an OpenAPI document (JSON or YAML), checks the structural
//! preconditions, and runs a full resolution pass over every schema in
//! `components.schemas`. The outcome is an [`IrGraph`]: the populated
//! schema index plus the warnings, cycle analysis, and a content hash of
//! the schema section for change detection.

use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::analysis::{analyze_reference_cycles, SccAnalysis};
use crate::config::ResolveConfig;
use crate::error::{Result, SpecError};
use crate::ir::SchemaIndex;
use crate::parsing::{parse_schema, ParsingContext};
use crate::raw::RawSchema;
use crate::warnings::WarningReport;

/// Supported document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

/// The result of one resolution pass.
#[derive(Debug)]
pub struct IrGraph {
    /// Every named schema, including promoted inline objects once the
    /// caller resolves types against the index.
    pub schemas: SchemaIndex,
    /// Warnings accumulated during parsing, in detection order.
    pub warnings: Vec<WarningReport>,
    /// SHA-256 over the canonical JSON of the schema section.
    pub bundle_hash: String,
    /// Strongly-connected-component view of the reference graph.
    pub cycles: SccAnalysis,
}

/// Load and resolve a spec document from disk, inferring the format from
/// the file extension.
pub fn load_spec_file(path: impl AsRef<Path>, config: ResolveConfig) -> Result<IrGraph> {
    let path = path.as_ref();
    let format = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => SpecFormat::Json,
        Some("yaml") | Some("yml") => SpecFormat::Yaml,
        other => {
            return Err(SpecError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            ))
        }
    };
    let content = std::fs::read_to_string(path)?;
    info!(path = %path.display(), ?format, "loading spec document");
    load_spec_str(&content, format, config)
}

/// Load and resolve a spec document from a string.
pub fn load_spec_str(content: &str, format: SpecFormat, config: ResolveConfig) -> Result<IrGraph> {
    // YAML decodes into a JSON value tree so hashing and parsing see one
    // canonical representation regardless of the source encoding.
    let document: Value = match format {
        SpecFormat::Json => serde_json::from_str(content)?,
        SpecFormat::Yaml => serde_yaml::from_str(content)?,
    };
    load_spec_value(&document, config)
}

/// Resolve an already-decoded spec document.
pub fn load_spec_value(document: &Value, config: ResolveConfig) -> Result<IrGraph> {
    let root = document.as_object().ok_or(SpecError::NotAnObject)?;
    let schemas_value = root
        .get("components")
        .and_then(Value::as_object)
        .and_then(|components| components.get("schemas"))
        .ok_or(SpecError::MissingSchemas)?;
    let schemas_obj = schemas_value
        .as_object()
        .ok_or(SpecError::MissingSchemas)?;

    let bundle_hash = hash_schema_section(schemas_value)?;

    let mut pre_warnings: Vec<(String, String)> = Vec::new();
    let mut raw_table: IndexMap<String, RawSchema> = IndexMap::with_capacity(schemas_obj.len());
    for (name, value) in schemas_obj {
        match serde_json::from_value::<RawSchema>(value.clone()) {
            Ok(raw) => {
                raw_table.insert(name.clone(), raw);
            }
            Err(err) => {
                pre_warnings.push((name.clone(), err.to_string()));
                raw_table.insert(name.clone(), RawSchema::default());
            }
        }
    }

    let cycles = analyze_reference_cycles(&raw_table);
    if config.debug_cycles {
        for group in cycles.groups() {
            debug!(members = ?group.members, self_referential = group.is_self_referential,
                "reference cycle group");
        }
    }

    let mut ctx = ParsingContext::new(raw_table, config);
    for (name, message) in pre_warnings {
        ctx.warnings.push(
            "malformed_schema",
            format!("schema '{name}' could not be decoded: {message}"),
            "the schema is treated as empty",
        );
    }

    let names: Vec<String> = ctx.raw_table().keys().cloned().collect();
    for name in &names {
        let raws = ctx.raw_table();
        let raw = raws.get(name);
        parse_schema(Some(name.as_str()), raw, &mut ctx);
    }

    info!(
        schemas = names.len(),
        warnings = ctx.warnings.len(),
        cycles = cycles.groups().len(),
        "resolution pass complete"
    );

    Ok(IrGraph {
        schemas: SchemaIndex::from_table(ctx.parsed),
        warnings: ctx.warnings.into_warnings(),
        bundle_hash,
        cycles,
    })
}

/// SHA-256 over the canonical JSON serialization of `components.schemas`.
/// YAML and JSON documents with identical schema sections hash identically.
fn hash_schema_section(schemas: &Value) -> Result<String> {
    let canonical = serde_json::to_vec(schemas)?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(format!("{:x}", hasher.finalize()))
}
