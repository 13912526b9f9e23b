//! Array resolution

use crate::ir::{JsonType, SchemaNodeRef};
use crate::resolution::context::ResolutionContext;
use crate::resolution::TypeEngine;

pub fn resolve(
    node: &SchemaNodeRef,
    hint: Option<&str>,
    ctx: &mut ResolutionContext<'_>,
) -> Option<String> {
    let items = {
        let n = node.borrow();
        if n.ty != Some(JsonType::Array) {
            return None;
        }
        n.items.clone()
    };

    let item_ty = match items {
        // Item types are resolved as required; element-level optionality
        // comes from the item schema's own nullability.
        Some(item) => TypeEngine::resolve_with(&item, true, false, hint, ctx),
        None => {
            ctx.add_import("typing", "Any");
            "Any".to_string()
        }
    };
    ctx.add_import("typing", "List");
    Some(format!("List[{item_ty}]"))
}
