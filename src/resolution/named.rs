//! Named-schema and enum resolution
//!
//! First stage of the chain. A node whose name is registered resolves to
//! its generated class, except for alias-like schemas wrapping a primitive
//! or array, which defer to the structural stages so references to them
//! inline the underlying type. Enums resolve to their class when named and
//! to their base scalar when anonymous.

use crate::ir::{JsonType, SchemaNodeRef};
use crate::resolution::context::ResolutionContext;

pub fn resolve(node: &SchemaNodeRef, ctx: &mut ResolutionContext<'_>) -> Option<String> {
    let n = node.borrow();

    if let Some(name) = &n.name {
        if let Some(target_ref) = ctx.schemas.get(name) {
            let defer_structural = {
                let target = target_ref.borrow();
                target.is_alias_like() && !matches!(target.ty, Some(JsonType::Object))
            };
            if defer_structural {
                return None;
            }
            let name = name.clone();
            drop(n);
            return Some(ctx.add_model_import(&name));
        }
    }

    if n.enum_values.is_some() {
        if let Some(name) = &n.name {
            let name = name.clone();
            drop(n);
            return Some(ctx.add_model_import(&name));
        }
        // Anonymous enum: fall back to the member scalar type.
        let base = match n.ty {
            Some(JsonType::Integer) => "int",
            _ => "str",
        };
        return Some(base.to_string());
    }

    None
}
