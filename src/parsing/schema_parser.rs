//! Recursive schema parsing
//!
//! `parse_schema` turns one raw node (and transitively everything it
//! references) into IR nodes, memoizing named results in the context cache.
//! Names follow one convention throughout: a name containing `.` is a
//! contextual hint for an inline child (`Parent.property`) and is never
//! registered as a canonical schema; a plain name is a document key.

use crate::ir::{AdditionalProperties, JsonType, SchemaNode, SchemaNodeRef};
use crate::names::sanitize_class_name;
use crate::parsing::all_of::merge_all_of;
use crate::parsing::context::{Entry, ParsingContext};
use crate::parsing::ref_resolver::resolve_ref;
use crate::parsing::type_parser::extract_primary_type;
use crate::raw::{RawAdditional, RawSchema};

/// Contextual name for an inline child of `parent`.
pub fn child_hint(parent: Option<&str>, prop: &str) -> String {
    match parent {
        Some(parent) => format!("{parent}.{prop}"),
        None => format!(".{prop}"),
    }
}

fn split_naming(name: Option<&str>) -> (Option<String>, Option<String>) {
    match name {
        Some(n) if n.contains('.') => {
            (None, Some(n.trim_start_matches('.').to_string()))
        }
        Some(n) => (Some(sanitize_class_name(n)), None),
        None => (None, None),
    }
}

/// Parse one schema node into the IR.
///
/// Every recursive entry goes through the context's depth/cycle guard. A
/// re-entered name yields a circular placeholder that is cached immediately,
/// so the re-entrant caller and the final registry hold the same instance.
pub fn parse_schema(
    name: Option<&str>,
    raw: Option<&RawSchema>,
    ctx: &mut ParsingContext,
) -> SchemaNodeRef {
    // Only canonical document keys participate in memoization and the
    // cycle stack; contextual hints are unique per use site.
    let canonical = name.filter(|n| !n.contains('.'));
    if let Some(n) = canonical {
        if let Some(cached) = ctx.cached(n) {
            return cached;
        }
    }

    match ctx.enter_schema(canonical) {
        Entry::Cycle { path } => {
            let node = on_cycle(canonical, &path, ctx);
            ctx.exit_schema(canonical, false);
            node
        }
        Entry::TooDeep => {
            let node = on_depth_exceeded(name, canonical, ctx);
            ctx.exit_schema(canonical, false);
            node
        }
        Entry::Descend { pushed } => {
            let node = build_node(name, raw, ctx);
            let node = cache_and_yield(canonical, node, ctx);
            ctx.exit_schema(canonical, pushed);
            node
        }
    }
}

fn on_cycle(canonical: Option<&str>, path: &str, ctx: &mut ParsingContext) -> SchemaNodeRef {
    let name = canonical.unwrap_or("<anonymous>");
    if let Some(existing) = ctx.cached(name) {
        return existing;
    }
    ctx.warnings.push(
        "circular_reference",
        format!("circular reference detected: {path}"),
        "the schema is emitted as a self-referential placeholder",
    );
    let node = SchemaNode::circular_placeholder(
        canonical,
        path,
        &format!("[circular reference: {path}]"),
    )
    .into_ref();
    ctx.cache(name, node.clone());
    node
}

fn on_depth_exceeded(
    name: Option<&str>,
    canonical: Option<&str>,
    ctx: &mut ParsingContext,
) -> SchemaNodeRef {
    let display = name.unwrap_or("<anonymous>");
    ctx.warnings.push(
        "max_depth_exceeded",
        format!(
            "maximum recursion depth ({}) exceeded while parsing '{display}'",
            ctx.config.max_depth
        ),
        "raise max_depth or break the schema nesting apart",
    );
    let path = format!("{display} -> MAX_DEPTH");
    let node = SchemaNode::circular_placeholder(
        canonical,
        &path,
        &format!("[maximum nesting depth exceeded at: {display}]"),
    )
    .into_ref();
    if let Some(n) = canonical {
        ctx.cache(n, node.clone());
    }
    node
}

/// Insert a freshly built node into the cache, unless a cycle placeholder
/// already holds the slot. A placeholder is handed out to re-entrant
/// callers mid-parse, so it must stay the canonical instance.
fn cache_and_yield(
    canonical: Option<&str>,
    node: SchemaNodeRef,
    ctx: &mut ParsingContext,
) -> SchemaNodeRef {
    if let Some(name) = canonical {
        if let Some(existing) = ctx.cached(name) {
            if existing.borrow().circular {
                return existing;
            }
        }
        ctx.cache(name, node.clone());
    }
    node
}

fn build_node(
    name: Option<&str>,
    raw: Option<&RawSchema>,
    ctx: &mut ParsingContext,
) -> SchemaNodeRef {
    let (canonical_name, context_name) = split_naming(name);

    let raw = match raw {
        Some(raw) => raw,
        None => {
            return SchemaNode {
                name: canonical_name,
                context_name,
                ..SchemaNode::default()
            }
            .into_ref()
        }
    };

    if let Some(ref_path) = &raw.ref_path {
        return resolve_ref(ref_path, name, ctx);
    }

    // OpenAPI 3.0 spelling; 3.1 arrives as a "null" entry in `type` or a
    // null-typed union member.
    let mut is_nullable = raw.nullable == Some(true);

    let any_of = parse_union_members(raw.any_of.as_deref(), &mut is_nullable, ctx);
    let one_of = parse_union_members(raw.one_of.as_deref(), &mut is_nullable, ctx);

    let (properties, required, all_of) = match &raw.all_of {
        Some(members_raw) => {
            let merged = merge_all_of(raw, members_raw, name, ctx);
            is_nullable |= merged.is_nullable;
            (merged.properties, merged.required, Some(merged.members))
        }
        None => {
            let mut properties = indexmap::IndexMap::new();
            for (prop, prop_raw) in &raw.properties {
                let hint = child_hint(name, prop);
                properties.insert(prop.clone(), parse_schema(Some(&hint), Some(prop_raw), ctx));
            }
            let required = raw.required.iter().cloned().collect();
            (properties, required, None)
        }
    };

    // Gate on the normalized unions, not the raw keys: a union that folded
    // away entirely (only null members) leaves the `type` keyword in charge.
    let mut ty = None;
    if any_of.is_none() && one_of.is_none() {
        let (primary, nullable) =
            extract_primary_type(raw.schema_type.as_ref(), name, &mut ctx.warnings);
        ty = primary;
        is_nullable |= nullable;
    }

    let items = if ty == Some(JsonType::Array) {
        raw.items
            .as_deref()
            .map(|item_raw| parse_schema(Some(&child_hint(name, "item")), Some(item_raw), ctx))
    } else {
        None
    };

    let additional_properties = match &raw.additional_properties {
        Some(RawAdditional::Allowed(allowed)) => Some(AdditionalProperties::Allowed(*allowed)),
        Some(RawAdditional::Schema(schema_raw)) => Some(AdditionalProperties::Schema(
            parse_schema(None, Some(schema_raw), ctx),
        )),
        None => None,
    };

    // A typeless schema with properties is an object in all but spelling.
    if ty.is_none() && !properties.is_empty() {
        ty = Some(JsonType::Object);
    }

    let is_data_wrapper = ty == Some(JsonType::Object)
        && properties.len() == 1
        && properties.contains_key("data")
        && required.contains("data");

    SchemaNode {
        name: canonical_name,
        context_name,
        ty,
        format: raw.format.clone(),
        description: raw.description.clone(),
        properties,
        required,
        items,
        enum_values: raw.enum_values.clone(),
        additional_properties,
        any_of,
        one_of,
        all_of,
        is_nullable,
        unresolved_reference: false,
        circular: false,
        circular_path: None,
        is_data_wrapper,
    }
    .into_ref()
}

/// Parse `anyOf`/`oneOf` members. A `{"type": "null"}` member is folded
/// into the nullability flag rather than kept as a union branch; a list
/// left empty by that folding collapses to no composition at all.
fn parse_union_members(
    members: Option<&[RawSchema]>,
    is_nullable: &mut bool,
    ctx: &mut ParsingContext,
) -> Option<Vec<SchemaNodeRef>> {
    let members = members?;
    let mut parsed = Vec::new();
    for member in members {
        if member.is_null_type() {
            *is_nullable = true;
            continue;
        }
        parsed.push(parse_schema(None, Some(member), ctx));
    }
    if parsed.is_empty() {
        None
    } else {
        Some(parsed)
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolveConfig;
    use indexmap::IndexMap;

    fn ctx() -> ParsingContext {
        ParsingContext::new(IndexMap::new(), ResolveConfig::default())
    }

    fn raw(json: serde_json::Value) -> RawSchema {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn null_union_member_folds_into_nullability() {
        let mut ctx = ctx();
        let raw = raw(serde_json::json!({
            "anyOf": [{"type": "string"}, {"type": "null"}]
        }));
        let node = parse_schema(None, Some(&raw), &mut ctx);
        let n = node.borrow();
        assert!(n.is_nullable);
        assert_eq!(n.any_of.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn all_null_union_collapses_to_no_composition() {
        let mut ctx = ctx();
        let raw = raw(serde_json::json!({"oneOf": [{"type": "null"}]}));
        let node = parse_schema(None, Some(&raw), &mut ctx);
        let n = node.borrow();
        assert!(n.is_nullable);
        assert!(n.one_of.is_none());
    }

    #[test]
    fn collapsed_union_leaves_the_type_keyword_in_charge() {
        let mut ctx = ctx();
        let raw = raw(serde_json::json!({
            "type": "string",
            "anyOf": [{"type": "null"}]
        }));
        let node = parse_schema(None, Some(&raw), &mut ctx);
        let n = node.borrow();
        assert!(n.is_nullable);
        assert!(n.any_of.is_none());
        assert_eq!(n.ty, Some(JsonType::String));
    }

    #[test]
    fn openapi_30_nullable_keyword_is_honored() {
        let mut ctx = ctx();
        let raw = raw(serde_json::json!({"type": "string", "nullable": true}));
        let node = parse_schema(None, Some(&raw), &mut ctx);
        assert!(node.borrow().is_nullable);
        assert_eq!(node.borrow().ty, Some(JsonType::String));
    }

    #[test]
    fn direct_properties_override_all_of_members() {
        let mut ctx = ctx();
        let raw = raw(serde_json::json!({
            "allOf": [
                {"type": "object", "properties": {"a": {"type": "string"}}}
            ],
            "properties": {"a": {"type": "integer"}}
        }));
        let node = parse_schema(Some("Composite"), Some(&raw), &mut ctx);
        let n = node.borrow();
        let a = n.properties.get("a").unwrap();
        assert_eq!(a.borrow().ty, Some(JsonType::Integer));
    }

    #[test]
    fn contextual_children_carry_hints_not_names() {
        let mut ctx = ctx();
        let raw = raw(serde_json::json!({
            "type": "object",
            "properties": {"inner": {"type": "object", "properties": {"x": {"type": "string"}}}}
        }));
        let node = parse_schema(Some("Outer"), Some(&raw), &mut ctx);
        let n = node.borrow();
        let inner = n.properties.get("inner").unwrap();
        let i = inner.borrow();
        assert_eq!(i.name, None);
        assert_eq!(i.context_name.as_deref(), Some("Outer.inner"));
        // Contextual hints never land in the cache.
        assert!(ctx.cached("Outer.inner").is_none());
        assert!(ctx.cached("Outer").is_some());
    }

    #[test]
    fn data_wrapper_requires_the_data_property() {
        let mut ctx = ctx();
        let wrapped = raw(serde_json::json!({
            "type": "object",
            "required": ["data"],
            "properties": {"data": {"type": "string"}}
        }));
        let node = parse_schema(Some("Envelope"), Some(&wrapped), &mut ctx);
        assert!(node.borrow().is_data_wrapper);

        let optional_data = raw(serde_json::json!({
            "type": "object",
            "properties": {"data": {"type": "string"}}
        }));
        let node = parse_schema(Some("Loose"), Some(&optional_data), &mut ctx);
        assert!(!node.borrow().is_data_wrapper);
    }
}
