//! Compiles nested variable maps into CSS custom property stylesheets.
//!
//! # Architecture
//!
//! ```text
//! options.json ──► ModuleSpec ──► Flattener ──► merge ──► render ──► CompiledModule
//!                                     │                                   │
//!                                     ▼                                   ▼
//!                                Diagnostics ───► DiagnosticSink    VirtualModules
//!                                                                  (resolve / load)
//! ```
//!
//! # Example
//!
//! ```rust
//! use cssvars_core::{CollectingSink, ModuleSpec, VariableMap, VirtualModules};
//!
//! let colors = VariableMap::new().with("blue", VariableMap::new().with("500", "#0000FF"));
//! let spec = ModuleSpec::new("virtual:theme.css")
//!     .with_source(VariableMap::new().with("color", colors));
//!
//! let mut sink = CollectingSink::default();
//! let modules = VirtualModules::build(&[spec], &mut sink);
//!
//! assert!(modules.resolve("virtual:theme.css"));
//! assert_eq!(
//!     modules.load("virtual:theme.css"),
//!     Some(":root {\n  --color-blue-500: #0000FF;\n}")
//! );
//! ```

mod compile;
mod diagnostics;
mod error;
mod flatten;
mod host;
mod merge;
mod node;
mod options;
mod output;
mod render;
mod spec;

pub use compile::{Compilation, Compiler, compile};
pub use diagnostics::{Diagnostic, Diagnostics, PLUGIN_NAME, Severity};
pub use error::{Error, Result};
pub use flatten::{
    CssValue, DEFAULT_MAX_DEPTH, DEFAULT_SELF_KEY, DEFAULT_SEPARATOR, FlatEntry, Flattened,
    Flattener, Problem, ProblemKind, flatten,
};
pub use host::{CollectingSink, DiagnosticSink, TracingSink, VirtualModules};
pub use merge::{FlatTable, merge};
pub use node::{Scalar, ValueKind, VariableMap, VariableNode};
pub use options::{ModuleOptions, load_options, parse_options};
pub use output::{module_file_name, write_modules};
pub use render::{DEFAULT_SELECTOR, DEFAULT_TAB_SIZE, Formatting, render, render_value};
pub use spec::{CompiledModule, ModuleSpec};
