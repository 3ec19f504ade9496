//! Diagnostics collected during a build.
//!
//! Problems are accumulated as typed records instead of being logged as they
//! are found, so a build stays a pure function of its options and the host
//! decides how to deliver them.

use std::fmt;

use crate::flatten::Problem;
use crate::host::DiagnosticSink;

/// Identity tag prefixed to every diagnostic line.
pub const PLUGIN_NAME: &str = "cssvars";

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The module could not be registered.
    Error,
    /// The build continued with a partial result.
    Warning,
}

/// A problem found while compiling module options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Options at `index` have an empty or missing module id.
    EmptyModuleId { index: usize },

    /// Options at `index` reuse an id already taken by earlier options.
    DuplicateModuleId { module_id: String, index: usize },

    /// The variables of a module contain values that were skipped.
    MalformedValue {
        module_id: String,
        problems: Vec<Problem>,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::EmptyModuleId { .. } => Severity::Error,
            Diagnostic::DuplicateModuleId { .. } | Diagnostic::MalformedValue { .. } => {
                Severity::Warning
            }
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Error
    }

    /// The message prefixed with the identity tag.
    pub fn line(&self) -> String {
        format!("[plugin:{}] {}", PLUGIN_NAME, self)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EmptyModuleId { index } => {
                write!(f, "empty module id found in plugin options at index {}", index)
            }
            Diagnostic::DuplicateModuleId { module_id, index } => write!(
                f,
                "duplicate module id, \"{}\", found in plugin options at index {}",
                module_id, index
            ),
            Diagnostic::MalformedValue { module_id, .. } => write!(
                f,
                "css variables object for module \"{}\" is malformed",
                module_id
            ),
        }
    }
}

/// Ordered collection of diagnostics from one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether any diagnostic prevents a module from being registered.
    pub fn has_fatal(&self) -> bool {
        self.items.iter().any(Diagnostic::is_fatal)
    }

    /// Tagged message lines in discovery order.
    pub fn lines(&self) -> Vec<String> {
        self.items.iter().map(Diagnostic::line).collect()
    }

    /// Deliver every diagnostic to `sink`, errors through `error` and the
    /// rest through `warn`.
    pub fn emit(&self, sink: &mut dyn DiagnosticSink) {
        for diagnostic in &self.items {
            let line = diagnostic.line();
            match diagnostic.severity() {
                Severity::Error => sink.error(&line),
                Severity::Warning => sink.warn(&line),
            }
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
