//! Host integration for virtual stylesheet modules.
//!
//! A host build pipeline asks two questions of the configured modules:
//! whether an id is one of them ([`VirtualModules::resolve`]) and what its
//! content is ([`VirtualModules::load`]). Diagnostics are delivered once,
//! when the modules are built, through a host-supplied [`DiagnosticSink`].

use rustc_hash::FxHashMap;

use crate::compile::{Compilation, Compiler};
use crate::diagnostics::Diagnostics;
use crate::spec::{CompiledModule, ModuleSpec};

/// Receives diagnostic lines from a build.
pub trait DiagnosticSink {
    fn warn(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&mut self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&mut self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Records diagnostics in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl CollectingSink {
    pub fn has_errored(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// The compiled virtual modules of one build.
#[derive(Debug, Clone)]
pub struct VirtualModules {
    modules: Vec<CompiledModule>,
    by_id: FxHashMap<String, usize>,
    diagnostics: Diagnostics,
}

impl VirtualModules {
    /// Compile `specs` and deliver the diagnostics to `sink`.
    pub fn build(specs: &[ModuleSpec], sink: &mut dyn DiagnosticSink) -> Self {
        Self::build_with(&Compiler::new(), specs, sink)
    }

    /// Like [`build`](Self::build), with a configured compiler.
    pub fn build_with(
        compiler: &Compiler,
        specs: &[ModuleSpec],
        sink: &mut dyn DiagnosticSink,
    ) -> Self {
        let compilation = compiler.compile(specs);
        compilation.diagnostics.emit(sink);

        tracing::debug!(
            "Built {} virtual modules ({} diagnostics)",
            compilation.modules.len(),
            compilation.diagnostics.len()
        );

        Self::from(compilation)
    }

    /// Whether `id` names one of the accepted modules.
    pub fn resolve(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Content of module `id`.
    ///
    /// Returns `None` for unknown ids and for modules without variables; the
    /// host must not generate a file in either case.
    pub fn load(&self, id: &str) -> Option<&str> {
        self.by_id
            .get(id)
            .and_then(|&position| self.modules[position].text.as_deref())
    }

    /// Concatenate the content of `ids` in order, skipping modules that have
    /// no content.
    pub fn bundle<'a, I>(&self, ids: I) -> Option<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let parts: Vec<&str> = ids.into_iter().filter_map(|id| self.load(id)).collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }

    /// Accepted module ids in options order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|module| module.module_id.as_str())
    }

    pub fn modules(&self) -> &[CompiledModule] {
        &self.modules
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Whether the build produced a fatal diagnostic.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_fatal()
    }
}

impl From<Compilation> for VirtualModules {
    fn from(compilation: Compilation) -> Self {
        let by_id = compilation
            .modules
            .iter()
            .enumerate()
            .map(|(position, module)| (module.module_id.clone(), position))
            .collect();
        Self {
            modules: compilation.modules,
            by_id,
            diagnostics: compilation.diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::VariableNode;
    use serde_json::json;

    fn spec(id: &str, value: serde_json::Value) -> ModuleSpec {
        ModuleSpec::new(id).with_source(VariableNode::from(value))
    }

    #[test]
    fn test_resolve_and_load() {
        let mut sink = CollectingSink::default();
        let modules = VirtualModules::build(
            &[
                spec("virtual:a.css", json!({"a": "1"})),
                spec("virtual:empty.css", json!({})),
            ],
            &mut sink,
        );

        assert!(modules.resolve("virtual:a.css"));
        assert!(modules.resolve("virtual:empty.css"));
        assert!(!modules.resolve("virtual:missing.css"));
        assert!(!modules.resolve("virtual:a"));

        assert_eq!(modules.load("virtual:a.css"), Some(":root {\n  --a: 1;\n}"));
        assert_eq!(modules.load("virtual:empty.css"), None);
        assert_eq!(modules.load("virtual:missing.css"), None);
        assert!(sink.warnings.is_empty());
        assert!(!sink.has_errored());
    }

    #[test]
    fn test_diagnostics_reach_sink() {
        let mut sink = CollectingSink::default();
        let modules = VirtualModules::build(
            &[
                ModuleSpec::default(),
                spec("virtual:a.css", json!({"a": "1"})),
                spec("virtual:a.css", json!({"a": "2"})),
            ],
            &mut sink,
        );

        assert!(modules.has_errors());
        assert_eq!(sink.errors.len(), 1);
        assert_eq!(sink.warnings.len(), 1);
        assert!(sink.errors[0].contains("empty module id found in plugin options at index 0"));
        assert!(sink.warnings[0].contains("at index 2"));
        assert_eq!(modules.ids().collect::<Vec<_>>(), vec!["virtual:a.css"]);
        assert_eq!(modules.load("virtual:a.css"), Some(":root {\n  --a: 1;\n}"));
    }

    #[test]
    fn test_bundle_concatenates_in_request_order() {
        let mut sink = CollectingSink::default();
        let modules = VirtualModules::build(
            &[
                spec("virtual:one.css", json!({"one": "1"})),
                spec("virtual:two.css", json!({"two": "2"})),
                spec("virtual:empty.css", json!({})),
            ],
            &mut sink,
        );

        assert_eq!(
            modules.bundle(["virtual:two.css", "virtual:empty.css", "virtual:one.css"]),
            Some(":root {\n  --two: 2;\n}\n\n:root {\n  --one: 1;\n}".to_string())
        );
        assert_eq!(modules.bundle(["virtual:empty.css"]), None);
    }
}
