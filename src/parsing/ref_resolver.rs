//! `$ref` resolution
//!
//! Only local component references (`#/components/schemas/Name`) are
//! supported. A missing target degrades through two naming-convention
//! fallbacks before giving up with an unresolved placeholder; every
//! fallback and failure leaves a warning behind.

use crate::ir::{JsonType, SchemaNode, SchemaNodeRef};
use crate::names::sanitize_class_name;
use crate::parsing::context::ParsingContext;
use crate::parsing::schema_parser::parse_schema;

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Suffixes that commonly decorate a base schema name in hand-written
/// documents (`PetResponse` for `Pet`). Tried in order; first hit wins.
const STRIPPABLE_SUFFIXES: [&str; 7] = [
    "Response", "Create", "Update", "Request", "Input", "Output", "Data",
];

pub fn resolve_ref(
    ref_path: &str,
    context_name: Option<&str>,
    ctx: &mut ParsingContext,
) -> SchemaNodeRef {
    let target = match ref_path.strip_prefix(SCHEMA_REF_PREFIX) {
        Some(t) if !t.is_empty() && !t.contains('/') => t.to_string(),
        _ => {
            ctx.warnings.push(
                "unsupported_ref",
                format!("unsupported or malformed $ref '{ref_path}'"),
                "only local '#/components/schemas/<Name>' references are resolved",
            );
            let named = context_name.filter(|n| !n.contains('.'));
            return SchemaNode::unresolved(named).into_ref();
        }
    };

    if let Some(cached) = ctx.cached(&target) {
        return cached;
    }

    let raws = ctx.raw_table();
    if let Some(raw) = raws.get(&target) {
        return parse_schema(Some(&target), Some(raw), ctx);
    }

    // Missing target: a '<Base>ListResponse' name synthesizes an array of
    // the base schema when the base itself exists.
    if let Some(base) = target.strip_suffix("ListResponse") {
        if !base.is_empty() {
            if let Some(base_raw) = raws.get(base) {
                let base_node = parse_schema(Some(base), Some(base_raw), ctx);
                if !base_node.borrow().unresolved_reference {
                    ctx.warnings.push(
                        "ref_fallback",
                        format!(
                            "$ref target '{target}' not found; synthesized an array of '{base}'"
                        ),
                        "declare the list schema explicitly to silence this",
                    );
                    let node = SchemaNode {
                        name: Some(sanitize_class_name(&target)),
                        ty: Some(JsonType::Array),
                        items: Some(base_node),
                        description: Some(format!("List of {base} items")),
                        ..SchemaNode::default()
                    }
                    .into_ref();
                    ctx.cache(&target, node.clone());
                    return node;
                }
            }
        }
    }

    // Second fallback: strip one conventional suffix and borrow the base
    // schema's structure under the referenced name.
    for suffix in STRIPPABLE_SUFFIXES {
        let base = match target.strip_suffix(suffix) {
            Some(base) if !base.is_empty() => base,
            _ => continue,
        };
        let base_raw = match raws.get(base) {
            Some(raw) => raw,
            None => continue,
        };
        let base_node = parse_schema(Some(base), Some(base_raw), ctx);
        if base_node.borrow().unresolved_reference {
            continue;
        }
        ctx.warnings.push(
            "ref_fallback",
            format!("$ref target '{target}' not found; reused the structure of '{base}'"),
            "declare the referenced schema explicitly to silence this",
        );
        let mut cloned = base_node.borrow().clone();
        cloned.name = Some(sanitize_class_name(&target));
        let node = cloned.into_ref();
        ctx.cache(&target, node.clone());
        return node;
    }

    ctx.warnings.push(
        "unresolved_ref",
        format!("$ref target '{target}' does not exist in components.schemas"),
        "the reference resolves to an unresolved placeholder",
    );
    let node = SchemaNode::unresolved(Some(&target)).into_ref();
    ctx.cache(&target, node.clone());
    node
}
