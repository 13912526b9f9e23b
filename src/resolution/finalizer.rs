//! Finalization: optionality wrapping and cleanup
//!
//! Runs on every resolved type. A type is optional when the use site does
//! not require it or the schema itself is nullable. Wrapping is idempotent:
//! an expression that already admits `None` is left alone, and in that case
//! no `Optional` import is registered either.

use crate::ir::SchemaNodeRef;
use crate::resolution::cleaner::{clean_type_parameters, split_top_level};
use crate::resolution::context::ResolutionContext;

pub fn finalize(
    ty: String,
    node: &SchemaNodeRef,
    required: bool,
    ctx: &mut ResolutionContext<'_>,
) -> String {
    let optional = !required || node.borrow().is_nullable;
    let ty = if optional && !admits_none(&ty) {
        ctx.add_import("typing", "Optional");
        format!("Optional[{ty}]")
    } else {
        ty
    };
    clean_type_parameters(&ty)
}

/// True when the expression already allows `None` at the top level.
fn admits_none(ty: &str) -> bool {
    if ty.starts_with("Optional[") {
        return true;
    }
    if let Some(inner) = ty.strip_prefix("Union[").and_then(|rest| rest.strip_suffix(']')) {
        return split_top_level(inner).iter().any(|p| p == "None");
    }
    false
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{SchemaIndex, SchemaNode};
    use crate::resolution::context::ImportCollector;

    fn node(nullable: bool) -> SchemaNodeRef {
        SchemaNode {
            is_nullable: nullable,
            ..SchemaNode::default()
        }
        .into_ref()
    }

    #[test]
    fn optional_wrap_applies_once() {
        let schemas = SchemaIndex::new();
        let mut sink = ImportCollector::new();
        let mut ctx = ResolutionContext::new(&schemas, &mut sink);
        let first = finalize("int".to_string(), &node(false), false, &mut ctx);
        assert_eq!(first, "Optional[int]");
        let second = finalize(first, &node(false), false, &mut ctx);
        assert_eq!(second, "Optional[int]");
    }

    #[test]
    fn already_optional_input_registers_no_import() {
        let schemas = SchemaIndex::new();
        let mut sink = ImportCollector::new();
        let mut ctx = ResolutionContext::new(&schemas, &mut sink);
        let out = finalize("Optional[int]".to_string(), &node(false), false, &mut ctx);
        assert_eq!(out, "Optional[int]");
        assert!(sink.is_empty());
    }

    #[test]
    fn union_with_none_is_not_rewrapped() {
        let schemas = SchemaIndex::new();
        let mut sink = ImportCollector::new();
        let mut ctx = ResolutionContext::new(&schemas, &mut sink);
        let out = finalize(
            "Union[int, None]".to_string(),
            &node(true),
            true,
            &mut ctx,
        );
        assert_eq!(out, "Union[int, None]");
        assert!(!sink.contains("typing", "Optional"));
    }

    #[test]
    fn required_non_nullable_stays_bare() {
        let schemas = SchemaIndex::new();
        let mut sink = ImportCollector::new();
        let mut ctx = ResolutionContext::new(&schemas, &mut sink);
        let out = finalize("str".to_string(), &node(false), true, &mut ctx);
        assert_eq!(out, "str");
        assert!(sink.is_empty());
    }

    #[test]
    fn nullable_schema_is_optional_even_when_required() {
        let schemas = SchemaIndex::new();
        let mut sink = ImportCollector::new();
        let mut ctx = ResolutionContext::new(&schemas, &mut sink);
        let out = finalize("str".to_string(), &node(true), true, &mut ctx);
        assert_eq!(out, "Optional[str]");
        assert!(sink.contains("typing", "Optional"));
    }
}
