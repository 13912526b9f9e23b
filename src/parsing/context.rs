//! Shared parsing state
//!
//! One `ParsingContext` lives for the duration of a graph build. It owns the
//! read-only raw schema table, the parsed-node cache, and the single
//! stack-based cycle guard that every recursive entry point goes through.

use std::collections::HashSet;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::config::ResolveConfig;
use crate::ir::SchemaNodeRef;
use crate::names::sanitize_class_name;
use crate::raw::RawSchema;
use crate::warnings::WarningCollector;

// ===== Stack Entry Outcome =====

/// What `enter_schema` observed for one recursive frame.
#[derive(Debug)]
pub enum Entry {
    /// Normal descent. `pushed` records whether this frame added a name to
    /// the stack and therefore must remove it on exit.
    Descend { pushed: bool },
    /// The named schema is already on the stack. Carries the ordered path
    /// from its first occurrence back to itself.
    Cycle { path: String },
    /// The recursion depth cap was hit before any stack bookkeeping.
    TooDeep,
}

// ===== Parsing Context =====

/// Mutable state threaded through the recursive schema parser.
pub struct ParsingContext {
    raw_schemas: Rc<IndexMap<String, RawSchema>>,
    /// Parsed nodes keyed by sanitized class name. Doubles as the
    /// memoization cache and as the canonical-instance store for cycles.
    pub parsed: IndexMap<String, SchemaNodeRef>,
    stack: Vec<String>,
    on_stack: HashSet<String>,
    depth: usize,
    cycle_count: usize,
    cycle_cap_reported: bool,
    pub config: ResolveConfig,
    pub warnings: WarningCollector,
}

impl ParsingContext {
    pub fn new(raw_schemas: IndexMap<String, RawSchema>, config: ResolveConfig) -> Self {
        Self {
            raw_schemas: Rc::new(raw_schemas),
            parsed: IndexMap::new(),
            stack: Vec::new(),
            on_stack: HashSet::new(),
            depth: 0,
            cycle_count: 0,
            cycle_cap_reported: false,
            config,
            warnings: WarningCollector::new(),
        }
    }

    /// Shared handle to the raw table, so callers can look nodes up while
    /// the context itself is mutably borrowed elsewhere.
    pub fn raw_table(&self) -> Rc<IndexMap<String, RawSchema>> {
        Rc::clone(&self.raw_schemas)
    }

    /// Cache key for a schema name: the sanitized class name, so lookups by
    /// raw document key and by generated class name agree.
    pub fn cache_key(&self, name: &str) -> String {
        sanitize_class_name(name)
    }

    pub fn cached(&self, name: &str) -> Option<SchemaNodeRef> {
        self.parsed.get(&self.cache_key(name)).cloned()
    }

    pub fn cache(&mut self, name: &str, node: SchemaNodeRef) {
        let key = self.cache_key(name);
        self.parsed.insert(key, node);
    }

    pub fn is_parsing(&self, name: &str) -> bool {
        self.on_stack.contains(name)
    }

    /// Begin one recursive frame. Depth is counted for every frame; only
    /// named frames participate in the cycle stack. Anonymous inline nodes
    /// cannot close a loop on their own, their nearest named ancestor does.
    pub fn enter_schema(&mut self, name: Option<&str>) -> Entry {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Entry::TooDeep;
        }
        match name {
            Some(name) if self.on_stack.contains(name) => {
                self.cycle_count += 1;
                if let Some(cap) = self.config.max_cycles {
                    if self.cycle_count > cap && !self.cycle_cap_reported {
                        self.cycle_cap_reported = true;
                        self.warnings.push(
                            "cycle_cap_exceeded",
                            format!(
                                "detected {} reference cycles, more than the configured cap of {}",
                                self.cycle_count, cap
                            ),
                            "check the document for unintentionally self-referential schemas",
                        );
                    }
                }
                let path = self.cycle_path(name);
                if self.config.debug_cycles {
                    debug!(schema = name, %path, "reference cycle detected");
                }
                Entry::Cycle { path }
            }
            Some(name) => {
                self.stack.push(name.to_string());
                self.on_stack.insert(name.to_string());
                Entry::Descend { pushed: true }
            }
            None => Entry::Descend { pushed: false },
        }
    }

    /// End the frame begun by the matching `enter_schema`. `pushed` must be
    /// the flag returned in `Entry::Descend`; cycle and depth outcomes pass
    /// `false` since they never touched the stack.
    pub fn exit_schema(&mut self, name: Option<&str>, pushed: bool) {
        self.depth = self.depth.saturating_sub(1);
        if pushed {
            if let Some(name) = name {
                self.on_stack.remove(name);
                if self.stack.last().map(String::as_str) == Some(name) {
                    self.stack.pop();
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn cycle_count(&self) -> usize {
        self.cycle_count
    }

    /// Ordered path from the first stack occurrence of `name` back to the
    /// re-entry, e.g. `Node -> Child -> Node`.
    fn cycle_path(&self, name: &str) -> String {
        let start = self
            .stack
            .iter()
            .position(|entry| entry == name)
            .unwrap_or(0);
        let mut segments: Vec<&str> = self.stack[start..].iter().map(String::as_str).collect();
        segments.push(name);
        segments.join(" -> ")
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ParsingContext {
        ParsingContext::new(IndexMap::new(), ResolveConfig::default())
    }

    #[test]
    fn reentering_a_stacked_name_reports_the_loop_path() {
        let mut ctx = context();
        assert!(matches!(ctx.enter_schema(Some("Node")), Entry::Descend { pushed: true }));
        assert!(matches!(ctx.enter_schema(Some("Child")), Entry::Descend { pushed: true }));
        match ctx.enter_schema(Some("Node")) {
            Entry::Cycle { path } => assert_eq!(path, "Node -> Child -> Node"),
            other => panic!("expected cycle, got {other:?}"),
        }
        ctx.exit_schema(Some("Node"), false);
        ctx.exit_schema(Some("Child"), true);
        ctx.exit_schema(Some("Node"), true);
        assert_eq!(ctx.depth(), 0);
        assert!(!ctx.is_parsing("Node"));
    }

    #[test]
    fn anonymous_frames_count_toward_depth_only() {
        let mut ctx = context();
        assert!(matches!(ctx.enter_schema(None), Entry::Descend { pushed: false }));
        assert_eq!(ctx.depth(), 1);
        assert!(matches!(ctx.enter_schema(None), Entry::Descend { pushed: false }));
        ctx.exit_schema(None, false);
        ctx.exit_schema(None, false);
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn depth_cap_fires_before_stack_bookkeeping() {
        let mut ctx = ParsingContext::new(
            IndexMap::new(),
            ResolveConfig {
                max_depth: 2,
                ..ResolveConfig::default()
            },
        );
        assert!(matches!(ctx.enter_schema(Some("A")), Entry::Descend { .. }));
        assert!(matches!(ctx.enter_schema(Some("B")), Entry::Descend { .. }));
        assert!(matches!(ctx.enter_schema(Some("C")), Entry::TooDeep));
        assert!(!ctx.is_parsing("C"));
    }

    #[test]
    fn cycle_cap_emits_a_single_warning() {
        let mut ctx = ParsingContext::new(
            IndexMap::new(),
            ResolveConfig {
                max_cycles: Some(1),
                ..ResolveConfig::default()
            },
        );
        ctx.enter_schema(Some("A"));
        assert!(matches!(ctx.enter_schema(Some("A")), Entry::Cycle { .. }));
        assert!(matches!(ctx.enter_schema(Some("A")), Entry::Cycle { .. }));
        let caps: Vec<_> = ctx
            .warnings
            .warnings()
            .iter()
            .filter(|w| w.code == "cycle_cap_exceeded")
            .collect();
        assert_eq!(caps.len(), 1);
    }
}
