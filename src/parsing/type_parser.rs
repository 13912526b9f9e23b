//! `type` keyword extraction
//!
//! Normalizes the raw `type` field, which may be a single keyword or a list
//! of keywords, into one primary structural type plus a nullability flag.
//! `"null"` is never a structural type in the IR; it only flips the flag.

use crate::ir::JsonType;
use crate::raw::RawType;
use crate::warnings::WarningCollector;

/// Reduce a raw `type` value to `(primary, is_nullable)`.
///
/// A list containing `"null"` marks the schema nullable; the remaining
/// entries are candidates for the primary type. More than one non-null
/// candidate cannot be represented structurally, so the first wins and a
/// warning records the discarded rest.
pub fn extract_primary_type(
    raw_type: Option<&RawType>,
    schema_name: Option<&str>,
    warnings: &mut WarningCollector,
) -> (Option<JsonType>, bool) {
    let keywords: Vec<&str> = match raw_type {
        None => return (None, false),
        Some(RawType::One(kw)) => vec![kw.as_str()],
        Some(RawType::Many(kws)) => kws.iter().map(String::as_str).collect(),
    };

    let mut is_nullable = false;
    let mut candidates: Vec<&str> = Vec::new();
    for kw in keywords {
        if kw == "null" {
            is_nullable = true;
        } else {
            candidates.push(kw);
        }
    }

    if candidates.len() > 1 {
        warnings.push(
            "multiple_types",
            format!(
                "schema '{}' declares multiple non-null types {:?}; using '{}'",
                schema_name.unwrap_or("<anonymous>"),
                candidates,
                candidates[0]
            ),
            "split the schema into a oneOf of single-typed members",
        );
    }

    let primary = match candidates.first() {
        None => None,
        Some(kw) => match JsonType::from_keyword(kw) {
            Some(ty) => Some(ty),
            None => {
                warnings.push(
                    "unknown_type",
                    format!(
                        "schema '{}' declares unknown type keyword '{}'",
                        schema_name.unwrap_or("<anonymous>"),
                        kw
                    ),
                    "expected one of string, integer, number, boolean, object, array, null",
                );
                None
            }
        },
    };

    (primary, is_nullable)
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_keyword_maps_directly() {
        let mut w = WarningCollector::new();
        let (ty, nullable) =
            extract_primary_type(Some(&RawType::One("string".into())), Some("S"), &mut w);
        assert_eq!(ty, Some(JsonType::String));
        assert!(!nullable);
        assert!(w.warnings().is_empty());
    }

    #[test]
    fn null_in_a_list_becomes_the_nullable_flag() {
        let mut w = WarningCollector::new();
        let raw = RawType::Many(vec!["string".into(), "null".into()]);
        let (ty, nullable) = extract_primary_type(Some(&raw), Some("S"), &mut w);
        assert_eq!(ty, Some(JsonType::String));
        assert!(nullable);
        assert!(w.warnings().is_empty());
    }

    #[test]
    fn bare_null_yields_no_type_but_nullable() {
        let mut w = WarningCollector::new();
        let (ty, nullable) =
            extract_primary_type(Some(&RawType::One("null".into())), None, &mut w);
        assert_eq!(ty, None);
        assert!(nullable);
    }

    #[test]
    fn multiple_non_null_types_take_the_first_and_warn() {
        let mut w = WarningCollector::new();
        let raw = RawType::Many(vec!["integer".into(), "string".into()]);
        let (ty, _) = extract_primary_type(Some(&raw), Some("Mixed"), &mut w);
        assert_eq!(ty, Some(JsonType::Integer));
        assert_eq!(w.warnings()[0].code, "multiple_types");
    }

    #[test]
    fn unknown_keyword_warns_and_yields_no_type() {
        let mut w = WarningCollector::new();
        let (ty, _) = extract_primary_type(Some(&RawType::One("file".into())), Some("F"), &mut w);
        assert_eq!(ty, None);
        assert_eq!(w.warnings()[0].code, "unknown_type");
    }
}
