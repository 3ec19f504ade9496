//! The build pass: module specs in, stylesheets and diagnostics out.
//!
//! ```text
//! ModuleSpec ──► id checks ──► Flattener (per source) ──► merge ──► render ──► CompiledModule
//!                    │                  │
//!                    ▼                  ▼
//!                        Diagnostics
//! ```
//!
//! Specs are compiled one after another and independently; a malformed spec
//! never affects the output of another.

use rustc_hash::FxHashSet;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::flatten::{DEFAULT_MAX_DEPTH, Flattener};
use crate::merge::merge;
use crate::render::render;
use crate::spec::{CompiledModule, ModuleSpec};

/// Result of compiling a set of module specs.
#[derive(Debug, Clone, Default)]
pub struct Compilation {
    /// Accepted modules in options order.
    pub modules: Vec<CompiledModule>,
    pub diagnostics: Diagnostics,
}

impl Compilation {
    pub fn module(&self, module_id: &str) -> Option<&CompiledModule> {
        self.modules.iter().find(|module| module.module_id == module_id)
    }
}

/// Compiles module specs.
#[derive(Debug, Clone)]
pub struct Compiler {
    max_depth: usize,
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit the nesting depth accepted in variable trees.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Compile every spec, dropping those with empty or duplicate ids.
    pub fn compile(&self, specs: &[ModuleSpec]) -> Compilation {
        let mut compilation = Compilation::default();
        let mut seen: FxHashSet<&str> = FxHashSet::default();

        for (index, spec) in specs.iter().enumerate() {
            let Some(module_id) = spec.id() else {
                tracing::debug!("Dropping options at index {} without a module id", index);
                compilation
                    .diagnostics
                    .push(Diagnostic::EmptyModuleId { index });
                continue;
            };

            if !seen.insert(module_id) {
                tracing::debug!("Dropping duplicate module {} at index {}", module_id, index);
                compilation.diagnostics.push(Diagnostic::DuplicateModuleId {
                    module_id: module_id.to_string(),
                    index,
                });
                continue;
            }

            let module = self.compile_module(module_id, spec, &mut compilation.diagnostics);
            compilation.modules.push(module);
        }

        compilation
    }

    /// Compile a single spec whose id has already been validated.
    pub fn compile_module(
        &self,
        module_id: &str,
        spec: &ModuleSpec,
        diagnostics: &mut Diagnostics,
    ) -> CompiledModule {
        let flattener = Flattener::new(spec.separator.as_str())
            .with_self_key(spec.self_key.clone())
            .with_max_depth(self.max_depth);

        let mut problems = Vec::new();
        let mut tables = Vec::with_capacity(spec.sources.len());
        for source in &spec.sources {
            let flattened = flattener.flatten(source);
            problems.extend(flattened.problems);
            tables.push(flattened.entries);
        }

        if !problems.is_empty() {
            for problem in &problems {
                tracing::debug!("Module {}: skipped {}", module_id, problem);
            }
            diagnostics.push(Diagnostic::MalformedValue {
                module_id: module_id.to_string(),
                problems,
            });
        }

        let entries = merge(tables);
        tracing::trace!(
            "Module {}: {} variables from {} sources",
            module_id,
            entries.len(),
            spec.sources.len()
        );

        let text = if entries.is_empty() {
            None
        } else {
            Some(render(&entries, &spec.selector, &spec.formatting))
        };

        CompiledModule {
            module_id: module_id.to_string(),
            text,
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile `specs` with default settings.
pub fn compile(specs: &[ModuleSpec]) -> Compilation {
    Compiler::new().compile(specs)
}
