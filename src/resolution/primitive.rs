//! Primitive scalar resolution
//!
//! String formats matter here: `date` and `date-time` pull in the
//! corresponding `datetime` types and `binary` becomes `bytes`; any other
//! format stays a plain string.

use crate::ir::{JsonType, SchemaNodeRef};
use crate::resolution::context::ResolutionContext;

pub fn resolve(node: &SchemaNodeRef, ctx: &mut ResolutionContext<'_>) -> Option<String> {
    let (ty, format) = {
        let n = node.borrow();
        (n.ty, n.format.clone())
    };
    let ty = match ty {
        Some(JsonType::String) => match format.as_deref() {
            Some("date") => {
                ctx.add_import("datetime", "date");
                "date"
            }
            Some("date-time") => {
                ctx.add_import("datetime", "datetime");
                "datetime"
            }
            Some("binary") => "bytes",
            _ => "str",
        },
        Some(JsonType::Integer) => "int",
        Some(JsonType::Number) => "float",
        Some(JsonType::Boolean) => "bool",
        _ => return None,
    };
    Some(ty.to_string())
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{SchemaIndex, SchemaNode};
    use crate::resolution::context::{ImportCollector, ResolutionContext};

    fn scalar(ty: JsonType, format: Option<&str>) -> SchemaNodeRef {
        SchemaNode {
            ty: Some(ty),
            format: format.map(str::to_string),
            ..SchemaNode::default()
        }
        .into_ref()
    }

    #[test]
    fn formats_refine_string() {
        let schemas = SchemaIndex::new();
        let mut sink = ImportCollector::new();
        let mut ctx = ResolutionContext::new(&schemas, &mut sink);
        assert_eq!(
            resolve(&scalar(JsonType::String, None), &mut ctx).as_deref(),
            Some("str")
        );
        assert_eq!(
            resolve(&scalar(JsonType::String, Some("date")), &mut ctx).as_deref(),
            Some("date")
        );
        assert_eq!(
            resolve(&scalar(JsonType::String, Some("date-time")), &mut ctx).as_deref(),
            Some("datetime")
        );
        assert_eq!(
            resolve(&scalar(JsonType::String, Some("binary")), &mut ctx).as_deref(),
            Some("bytes")
        );
        assert!(sink.contains("datetime", "date"));
        assert!(sink.contains("datetime", "datetime"));
    }

    #[test]
    fn non_scalars_pass_through() {
        let schemas = SchemaIndex::new();
        let mut sink = ImportCollector::new();
        let mut ctx = ResolutionContext::new(&schemas, &mut sink);
        assert_eq!(resolve(&scalar(JsonType::Object, None), &mut ctx), None);
        assert_eq!(
            resolve(&SchemaNode::default().into_ref(), &mut ctx),
            None
        );
    }
}
