//! Module specifications and compiled modules.

use crate::flatten::{DEFAULT_SELF_KEY, DEFAULT_SEPARATOR};
use crate::node::VariableNode;
use crate::render::{DEFAULT_SELECTOR, Formatting};

/// One virtual module to compile.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSpec {
    /// Virtual module id. Specs without a non-empty id are dropped.
    pub module_id: Option<String>,

    /// Variable trees, merged in order.
    pub sources: Vec<VariableNode>,

    /// String joining nested key segments.
    pub separator: String,

    /// Selector wrapping the declarations.
    pub selector: String,

    /// Key naming its parent's own value; `None` disables the convention.
    pub self_key: Option<String>,

    pub formatting: Formatting,
}

impl ModuleSpec {
    /// Create a spec with default settings and no variables.
    pub fn new(module_id: impl Into<String>) -> Self {
        Self {
            module_id: Some(module_id.into()),
            ..Self::default()
        }
    }

    /// Append a variable tree.
    pub fn with_source(mut self, source: impl Into<VariableNode>) -> Self {
        self.sources.push(source.into());
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn with_self_key(mut self, self_key: Option<String>) -> Self {
        self.self_key = self_key;
        self
    }

    pub fn with_formatting(mut self, formatting: Formatting) -> Self {
        self.formatting = formatting;
        self
    }

    /// The module id, if present and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.module_id.as_deref().filter(|id| !id.is_empty())
    }
}

impl Default for ModuleSpec {
    fn default() -> Self {
        Self {
            module_id: None,
            sources: Vec::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
            selector: DEFAULT_SELECTOR.to_string(),
            self_key: Some(DEFAULT_SELF_KEY.to_string()),
            formatting: Formatting::default(),
        }
    }
}

/// The generated stylesheet of one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledModule {
    pub module_id: String,

    /// Rendered stylesheet, or `None` when the module declares no variables.
    pub text: Option<String>,
}

impl CompiledModule {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
    }
}
