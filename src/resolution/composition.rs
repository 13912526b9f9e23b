//! Composition resolution (`anyOf`, `oneOf`, `allOf`)

use crate::ir::{JsonType, SchemaNodeRef};
use crate::resolution::context::ResolutionContext;
use crate::resolution::TypeEngine;

pub fn resolve(
    node: &SchemaNodeRef,
    hint: Option<&str>,
    ctx: &mut ResolutionContext<'_>,
) -> Option<String> {
    let (union_members, all_of_members) = {
        let n = node.borrow();
        let union = n.any_of.clone().or_else(|| n.one_of.clone());
        (union, n.all_of.clone())
    };

    if let Some(members) = union_members {
        return Some(resolve_union(&members, hint, ctx));
    }
    if let Some(members) = all_of_members {
        return Some(resolve_all_of(&members, hint, ctx));
    }
    None
}

/// `anyOf`/`oneOf` become a union of member types. Duplicates collapse
/// while keeping first-seen order; a single survivor is used bare.
fn resolve_union(
    members: &[SchemaNodeRef],
    hint: Option<&str>,
    ctx: &mut ResolutionContext<'_>,
) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(members.len());
    for member in members {
        let part = TypeEngine::resolve_with(member, true, false, hint, ctx);
        if !parts.contains(&part) {
            parts.push(part);
        }
    }
    match parts.len() {
        0 => {
            ctx.add_import("typing", "Any");
            "Any".to_string()
        }
        1 => parts.remove(0),
        _ => {
            ctx.add_import("typing", "Union");
            format!("Union[{}]", parts.join(", "))
        }
    }
}

/// `allOf` resolves to its sole member when there is one. With several
/// members the first one stands in for the merge, unless it is an
/// anonymous object, which has no referencable class and degrades to a
/// string-keyed map.
fn resolve_all_of(
    members: &[SchemaNodeRef],
    hint: Option<&str>,
    ctx: &mut ResolutionContext<'_>,
) -> String {
    match members.first() {
        None => {
            ctx.add_import("typing", "Any");
            "Any".to_string()
        }
        Some(first) => {
            if members.len() > 1 {
                let anonymous_object = {
                    let f = first.borrow();
                    f.name.is_none() && matches!(f.ty, Some(JsonType::Object))
                };
                if anonymous_object {
                    ctx.add_import("typing", "Dict");
                    ctx.add_import("typing", "Any");
                    return "Dict[str, Any]".to_string();
                }
            }
            TypeEngine::resolve_with(first, true, false, hint, ctx)
        }
    }
}

// ===== Tests =====
