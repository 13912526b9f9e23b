//! Type-expression cleaning
//!
//! Repairs malformed generic parameter lists without changing meaning.
//! `Union` keeps every member it was given, including `None`; the fixed
//! arity containers (`List`, `Dict`, `Optional`) drop only stray literal
//! `None` parameters beyond their arity.

/// Split a parameter list at commas that sit outside any brackets.
pub fn split_top_level(params: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in params.chars() {
        match c {
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    let last = current.trim();
    if !last.is_empty() {
        parts.push(last.to_string());
    }
    parts
}

/// Normalize one type expression, recursing into its parameters.
pub fn clean_type_parameters(type_str: &str) -> String {
    match type_str {
        "Union[]" => return "Any".to_string(),
        "Optional[None]" => return "Optional[Any]".to_string(),
        _ => {}
    }

    let open = match type_str.find('[') {
        Some(i) => i,
        None => return type_str.to_string(),
    };
    if !type_str.ends_with(']') {
        return type_str.to_string();
    }

    let container = &type_str[..open];
    let inner = &type_str[open + 1..type_str.len() - 1];
    let parts = split_top_level(inner);

    match container {
        "Union" => {
            let mut members: Vec<String> = Vec::with_capacity(parts.len());
            for part in parts {
                let cleaned = clean_member(&part);
                if !members.contains(&cleaned) {
                    members.push(cleaned);
                }
            }
            match members.len() {
                0 => "Any".to_string(),
                1 if members[0] == "None" => "Any".to_string(),
                1 => members.remove(0),
                _ => format!("Union[{}]", members.join(", ")),
            }
        }
        "Optional" => {
            let kept = repair_arity(parts, 1);
            let inner = kept
                .first()
                .map(|p| clean_member(p))
                .unwrap_or_else(|| "Any".to_string());
            if inner == "None" {
                "Optional[Any]".to_string()
            } else {
                format!("Optional[{inner}]")
            }
        }
        "List" => {
            let kept: Vec<String> = repair_arity(parts, 1)
                .iter()
                .map(|p| clean_member(p))
                .collect();
            format!("List[{}]", kept.join(", "))
        }
        "Dict" => {
            let kept: Vec<String> = repair_arity(parts, 2)
                .iter()
                .map(|p| clean_member(p))
                .collect();
            format!("Dict[{}]", kept.join(", "))
        }
        _ => {
            let kept: Vec<String> = parts.iter().map(|p| clean_member(p)).collect();
            format!("{container}[{}]", kept.join(", "))
        }
    }
}

/// Keep the first `arity` parameters; beyond that, drop only the literal
/// `None` token. Non-`None` extras are malformed input and survive so the
/// breakage stays visible downstream.
fn repair_arity(parts: Vec<String>, arity: usize) -> Vec<String> {
    parts
        .into_iter()
        .enumerate()
        .filter(|(i, p)| *i < arity || p != "None")
        .map(|(_, p)| p)
        .collect()
}

fn clean_member(part: &str) -> String {
    if part == "None" {
        part.to_string()
    } else {
        clean_type_parameters(part)
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_only_at_top_level_commas() {
        assert_eq!(
            split_top_level("str, Dict[str, int], List[Union[int, str]]"),
            vec!["str", "Dict[str, int]", "List[Union[int, str]]"]
        );
    }

    #[test]
    fn drops_excess_none_parameters() {
        assert_eq!(clean_type_parameters("Dict[str, Any, None]"), "Dict[str, Any]");
        assert_eq!(clean_type_parameters("List[JsonValue, None]"), "List[JsonValue]");
        assert_eq!(clean_type_parameters("Optional[Any, None]"), "Optional[Any]");
    }

    #[test]
    fn union_members_are_never_stripped() {
        assert_eq!(
            clean_type_parameters("Union[int, float, None]"),
            "Union[int, float, None]"
        );
    }

    #[test]
    fn degenerate_forms_collapse_to_any() {
        assert_eq!(clean_type_parameters("Union[]"), "Any");
        assert_eq!(clean_type_parameters("Optional[None]"), "Optional[Any]");
    }

    #[test]
    fn recursion_reaches_nested_parameters() {
        assert_eq!(
            clean_type_parameters("Dict[str, List[int, None]]"),
            "Dict[str, List[int]]"
        );
        assert_eq!(
            clean_type_parameters("Optional[Dict[str, Any, None]]"),
            "Optional[Dict[str, Any]]"
        );
    }

    #[test]
    fn union_deduplicates_in_first_seen_order() {
        assert_eq!(
            clean_type_parameters("Union[str, int, str]"),
            "Union[str, int]"
        );
        assert_eq!(clean_type_parameters("Union[str, str]"), "str");
    }

    #[test]
    fn unknown_containers_pass_through_cleaned() {
        assert_eq!(
            clean_type_parameters("Tuple[int, List[str, None]]"),
            "Tuple[int, List[str]]"
        );
        assert_eq!(clean_type_parameters("str"), "str");
    }
}
