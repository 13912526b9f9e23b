//! Object resolution and inline-object promotion
//!
//! Map-shaped objects resolve to `Dict[str, V]`. Anonymous objects with
//! real properties are promoted: they receive a class name derived from
//! their contextual hint, get registered in the schema index, and resolve
//! to that new class from then on, so every use site shares one model.

use crate::ir::{AdditionalProperties, JsonType, SchemaNodeRef};
use crate::names::sanitize_class_name;
use crate::resolution::context::ResolutionContext;
use crate::resolution::TypeEngine;

pub fn resolve(
    node: &SchemaNodeRef,
    hint: Option<&str>,
    ctx: &mut ResolutionContext<'_>,
) -> Option<String> {
    {
        let n = node.borrow();
        if n.ty != Some(JsonType::Object) {
            return None;
        }
    }

    if let Some(ty) = resolve_map_shape(node, hint, ctx) {
        return Some(ty);
    }

    let (name, has_properties) = {
        let n = node.borrow();
        (n.name.clone(), !n.properties.is_empty())
    };

    if let Some(name) = name {
        return Some(ctx.add_model_import(&name));
    }

    if has_properties {
        if let Some(hint) = hint {
            return Some(promote(node, hint, ctx));
        }
        // No naming context to promote under.
        ctx.add_import("typing", "Dict");
        ctx.add_import("typing", "Any");
        return Some("Dict[str, Any]".to_string());
    }

    // Structureless anonymous object. `additionalProperties: false` (or an
    // empty value schema) closes it down to nothing expressible.
    let closed = {
        let n = node.borrow();
        match &n.additional_properties {
            Some(AdditionalProperties::Allowed(false)) => true,
            Some(AdditionalProperties::Schema(value)) => {
                let v = value.borrow();
                v.is_alias_like() && v.ty.is_none() && v.name.is_none() && v.items.is_none()
            }
            _ => false,
        }
    };
    if closed {
        ctx.add_import("typing", "Any");
        Some("Any".to_string())
    } else {
        ctx.add_import("typing", "Dict");
        ctx.add_import("typing", "Any");
        Some("Dict[str, Any]".to_string())
    }
}

/// Open objects and typed-value maps.
fn resolve_map_shape(
    node: &SchemaNodeRef,
    hint: Option<&str>,
    ctx: &mut ResolutionContext<'_>,
) -> Option<String> {
    let additional = {
        let n = node.borrow();
        n.additional_properties.clone()
    };
    match additional {
        Some(AdditionalProperties::Allowed(true)) => {
            ctx.add_import("typing", "Dict");
            ctx.add_import("typing", "Any");
            Some("Dict[str, Any]".to_string())
        }
        Some(AdditionalProperties::Schema(value)) if has_structure(&value) => {
            let value_ty = TypeEngine::resolve_with(&value, true, false, hint, ctx);
            ctx.add_import("typing", "Dict");
            Some(format!("Dict[str, {value_ty}]"))
        }
        _ => None,
    }
}

fn has_structure(node: &SchemaNodeRef) -> bool {
    let n = node.borrow();
    n.name.is_some()
        || n.ty.is_some()
        || !n.properties.is_empty()
        || n.items.is_some()
        || n.enum_values.is_some()
        || n.any_of.is_some()
        || n.one_of.is_some()
        || n.all_of.is_some()
}

/// Name an anonymous object after its use site and register it.
fn promote(node: &SchemaNodeRef, hint: &str, ctx: &mut ResolutionContext<'_>) -> String {
    let base = sanitize_class_name(hint);
    let final_name = ctx.schemas.unique_name(&base);
    node.borrow_mut().name = Some(final_name.clone());
    ctx.schemas.register(&final_name, node.clone());
    ctx.add_model_import(&final_name)
}
