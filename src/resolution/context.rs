//! Resolution state and import collection

use std::collections::{BTreeMap, BTreeSet};

use crate::ir::SchemaIndex;
use crate::names::{sanitize_class_name, sanitize_module_name};

/// Receiver for import registrations made during type resolution.
///
/// Emitters implement this to learn which `(module, symbol)` pairs a
/// resolved type expression depends on. Registration must be idempotent.
pub trait ImportSink {
    fn register_import(&mut self, module: &str, symbol: &str);
}

/// Deduplicating [`ImportSink`] with deterministic iteration order.
#[derive(Debug, Default)]
pub struct ImportCollector {
    imports: BTreeMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, module: &str, symbol: &str) -> bool {
        self.imports
            .get(module)
            .map(|symbols| symbols.contains(symbol))
            .unwrap_or(false)
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.imports.keys().map(String::as_str)
    }

    pub fn symbols_for(&self, module: &str) -> Vec<&str> {
        self.imports
            .get(module)
            .map(|symbols| symbols.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.imports.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }
}

impl ImportSink for ImportCollector {
    fn register_import(&mut self, module: &str, symbol: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }
}

/// State threaded through one resolution traversal: the named-schema
/// registry (promotion registers into it) and the caller's import sink.
pub struct ResolutionContext<'a> {
    pub schemas: &'a SchemaIndex,
    pub sink: &'a mut dyn ImportSink,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(schemas: &'a SchemaIndex, sink: &'a mut dyn ImportSink) -> Self {
        Self { schemas, sink }
    }

    pub fn add_import(&mut self, module: &str, symbol: &str) {
        self.sink.register_import(module, symbol);
    }

    /// Register the model-module import for a named schema class.
    pub fn add_model_import(&mut self, schema_name: &str) -> String {
        let class_name = sanitize_class_name(schema_name);
        let module = format!("models.{}", sanitize_module_name(schema_name));
        self.add_import(&module, &class_name);
        class_name
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_is_idempotent() {
        let mut collector = ImportCollector::new();
        collector.register_import("typing", "Optional");
        collector.register_import("typing", "Optional");
        collector.register_import("typing", "List");
        assert_eq!(collector.len(), 2);
        assert_eq!(collector.symbols_for("typing"), vec!["List", "Optional"]);
    }

    #[test]
    fn model_imports_use_the_snake_case_module() {
        let schemas = SchemaIndex::new();
        let mut collector = ImportCollector::new();
        let mut ctx = ResolutionContext::new(&schemas, &mut collector);
        let class_name = ctx.add_model_import("HTTPValidationError");
        assert_eq!(class_name, "HTTPValidationError");
        assert!(collector.contains("models.http_validation_error", "HTTPValidationError"));
    }
}
