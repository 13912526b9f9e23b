//! Type resolution
//!
//! Maps IR nodes to target-language type expressions. Resolution is an
//! ordered chain of stages, each claiming the shapes it understands and
//! otherwise passing the node along: named lookup, composition, primitive,
//! array, object, and finally a catch-all `Any`. Whatever the chain yields
//! is always post-processed by the finalizer (optionality wrapping plus
//! parameter-list cleaning).

pub mod array;
pub mod cleaner;
pub mod composition;
pub mod context;
pub mod finalizer;
pub mod named;
pub mod object;
pub mod primitive;

pub use context::{ImportCollector, ImportSink, ResolutionContext};

use crate::ir::SchemaNodeRef;

/// The resolution entry point. Stateless; all mutable state lives in the
/// [`ResolutionContext`].
pub struct TypeEngine;

impl TypeEngine {
    /// Resolve a node to a type expression. `required` reflects whether the
    /// use site lists the property as required; it feeds the finalizer's
    /// optionality decision together with the node's own nullability.
    pub fn resolve(
        node: &SchemaNodeRef,
        required: bool,
        ctx: &mut ResolutionContext<'_>,
    ) -> String {
        Self::resolve_with(node, required, false, None, ctx)
    }

    /// Like [`TypeEngine::resolve`], but `resolve_underlying` skips the
    /// named-lookup stage so an alias schema resolves to its structural
    /// type instead of its own class name. Used when emitting the alias
    /// definition itself.
    pub fn resolve_with(
        node: &SchemaNodeRef,
        required: bool,
        resolve_underlying: bool,
        parent_hint: Option<&str>,
        ctx: &mut ResolutionContext<'_>,
    ) -> String {
        let hint = {
            let n = node.borrow();
            n.context_name
                .clone()
                .or_else(|| parent_hint.map(str::to_string))
                .or_else(|| n.name.clone())
        };
        let hint = hint.as_deref();

        let mut ty = None;
        if !resolve_underlying {
            ty = named::resolve(node, ctx);
        } else if node.borrow().enum_values.is_some() {
            // Enum aliases still resolve to the enum itself.
            ty = named::resolve(node, ctx);
        }
        if ty.is_none() {
            ty = composition::resolve(node, hint, ctx);
        }
        if ty.is_none() {
            ty = primitive::resolve(node, ctx);
        }
        if ty.is_none() {
            ty = array::resolve(node, hint, ctx);
        }
        if ty.is_none() {
            ty = object::resolve(node, hint, ctx);
        }
        let ty = ty.unwrap_or_else(|| {
            ctx.add_import("typing", "Any");
            "Any".to_string()
        });
        finalizer::finalize(ty, node, required, ctx)
    }
}
