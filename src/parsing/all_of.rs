//! `allOf` merging
//!
//! Flattens an `allOf` list into a single merged property map. Member order
//! is significant: later members override earlier ones on a property-name
//! clash, and properties declared directly on the composite schema override
//! everything contributed by members.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::ir::SchemaNodeRef;
use crate::parsing::schema_parser::{child_hint, parse_schema};
use crate::parsing::ParsingContext;
use crate::raw::RawSchema;

/// Outcome of flattening one `allOf` list.
pub struct MergedAllOf {
    /// Merged properties in first-seen order, later members winning.
    pub properties: IndexMap<String, SchemaNodeRef>,
    /// Union of every member's required set and the composite's own.
    pub required: BTreeSet<String>,
    /// The parsed members themselves, in declaration order.
    pub members: Vec<SchemaNodeRef>,
    /// True when any member is nullable.
    pub is_nullable: bool,
}

pub fn merge_all_of(
    raw: &RawSchema,
    members_raw: &[RawSchema],
    parent_name: Option<&str>,
    ctx: &mut ParsingContext,
) -> MergedAllOf {
    let mut properties: IndexMap<String, SchemaNodeRef> = IndexMap::new();
    let mut required: BTreeSet<String> = raw.required.iter().cloned().collect();
    let mut members: Vec<SchemaNodeRef> = Vec::new();
    let mut is_nullable = false;

    for member_raw in members_raw {
        let member = parse_schema(None, Some(member_raw), ctx);
        {
            let m = member.borrow();
            for (prop, node) in &m.properties {
                // IndexMap::insert keeps the original position on override,
                // so first-seen order survives later-member wins.
                properties.insert(prop.clone(), node.clone());
            }
            required.extend(m.required.iter().cloned());
            is_nullable |= m.is_nullable;
        }
        members.push(member);
    }

    // Direct sibling properties are the most specific layer.
    for (prop, prop_raw) in &raw.properties {
        let hint = child_hint(parent_name, prop);
        let node = parse_schema(Some(&hint), Some(prop_raw), ctx);
        properties.insert(prop.clone(), node);
    }

    MergedAllOf {
        properties,
        required,
        members,
        is_nullable,
    }
}
