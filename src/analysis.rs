//! Reference-cycle diagnostics
//!
//! Builds a directed reference graph over the raw schema table and reports
//! its strongly connected components. This is purely diagnostic: the parser
//! already guards itself against cycles, but emitters and humans want to
//! know which schema families are mutually recursive.

use std::collections::HashMap;

use indexmap::IndexMap;
use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::raw::{RawAdditional, RawSchema};

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// One strongly connected family of schemas.
#[derive(Debug, Clone)]
pub struct CycleGroup {
    /// Schema names in the component, in graph order.
    pub members: Vec<String>,
    /// True for a single schema that references itself directly.
    pub is_self_referential: bool,
}

/// All reference cycles found in one document.
#[derive(Debug, Clone, Default)]
pub struct SccAnalysis {
    groups: Vec<CycleGroup>,
}

impl SccAnalysis {
    pub fn groups(&self) -> &[CycleGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether `name` participates in any cycle.
    pub fn is_cyclic(&self, name: &str) -> bool {
        self.groups
            .iter()
            .any(|g| g.members.iter().any(|m| m == name))
    }
}

/// Compute the cycle groups of a raw schema table. Only components of size
/// two or more, plus direct self-references, are reported; a lone acyclic
/// schema is not a group.
pub fn analyze_reference_cycles(raw: &IndexMap<String, RawSchema>) -> SccAnalysis {
    let mut graph: DiGraph<String, ()> = DiGraph::new();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::with_capacity(raw.len());
    for name in raw.keys() {
        indices.insert(name.as_str(), graph.add_node(name.clone()));
    }

    for (name, schema) in raw {
        let from = indices[name.as_str()];
        let mut targets = Vec::new();
        collect_ref_targets(schema, &mut targets);
        for target in targets {
            if let Some(&to) = indices.get(target.as_str()) {
                if graph.find_edge(from, to).is_none() {
                    graph.add_edge(from, to, ());
                }
            }
        }
    }

    let mut groups = Vec::new();
    for component in kosaraju_scc(&graph) {
        if component.len() > 1 {
            groups.push(CycleGroup {
                members: component.iter().map(|&idx| graph[idx].clone()).collect(),
                is_self_referential: false,
            });
        } else if let Some(&idx) = component.first() {
            if graph.find_edge(idx, idx).is_some() {
                groups.push(CycleGroup {
                    members: vec![graph[idx].clone()],
                    is_self_referential: true,
                });
            }
        }
    }
    SccAnalysis { groups }
}

/// Every `$ref` target reachable inside one raw node, including through
/// properties, items, value schemas, and composition members.
fn collect_ref_targets(schema: &RawSchema, out: &mut Vec<String>) {
    if let Some(ref_path) = &schema.ref_path {
        if let Some(target) = ref_path.strip_prefix(SCHEMA_REF_PREFIX) {
            out.push(target.to_string());
        }
    }
    for prop in schema.properties.values() {
        collect_ref_targets(prop, out);
    }
    if let Some(items) = &schema.items {
        collect_ref_targets(items, out);
    }
    if let Some(RawAdditional::Schema(value)) = &schema.additional_properties {
        collect_ref_targets(value, out);
    }
    for members in [&schema.any_of, &schema.one_of, &schema.all_of]
        .into_iter()
        .flatten()
    {
        for member in members {
            collect_ref_targets(member, out);
        }
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    fn table(json: serde_json::Value) -> IndexMap<String, RawSchema> {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn mutual_references_form_one_group() {
        let raw = table(serde_json::json!({
            "A": {"type": "object", "properties": {"b": {"$ref": "#/components/schemas/B"}}},
            "B": {"type": "object", "properties": {"a": {"$ref": "#/components/schemas/A"}}},
            "C": {"type": "string"}
        }));
        let analysis = analyze_reference_cycles(&raw);
        assert_eq!(analysis.groups().len(), 1);
        let group = &analysis.groups()[0];
        assert!(!group.is_self_referential);
        let mut members = group.members.clone();
        members.sort();
        assert_eq!(members, vec!["A", "B"]);
        assert!(analysis.is_cyclic("A"));
        assert!(!analysis.is_cyclic("C"));
    }

    #[test]
    fn direct_self_reference_is_flagged() {
        let raw = table(serde_json::json!({
            "Node": {
                "type": "object",
                "properties": {
                    "children": {
                        "type": "array",
                        "items": {"$ref": "#/components/schemas/Node"}
                    }
                }
            }
        }));
        let analysis = analyze_reference_cycles(&raw);
        assert_eq!(analysis.groups().len(), 1);
        assert!(analysis.groups()[0].is_self_referential);
    }

    #[test]
    fn acyclic_documents_report_nothing() {
        let raw = table(serde_json::json!({
            "Leaf": {"type": "string"},
            "Tree": {"type": "object", "properties": {"leaf": {"$ref": "#/components/schemas/Leaf"}}}
        }));
        assert!(analyze_reference_cycles(&raw).is_empty());
    }
}
