//! Stylesheet rendering.
//!
//! Serializes flattened variables into a single rule block of custom
//! property declarations:
//!
//! ```text
//! pretty:    :root {\n  --name: value;\n}
//! minified:  :root {--name: value;}
//! ```

use std::num::NonZeroUsize;

use crate::flatten::{CssValue, FlatEntry};

/// Default selector wrapping all declarations.
pub const DEFAULT_SELECTOR: &str = ":root";

/// Default number of spaces per indentation level.
pub const DEFAULT_TAB_SIZE: NonZeroUsize = match NonZeroUsize::new(2) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Whitespace policy for rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formatting {
    /// One declaration per line with indentation.
    pub pretty: bool,
    /// Indent with a tab instead of spaces. Only used when `pretty` is set.
    pub use_tabs: bool,
    /// Spaces per indent. Only used when `pretty` is set and `use_tabs` is not.
    pub tab_size: NonZeroUsize,
}

impl Formatting {
    /// Formatting with no interior whitespace.
    pub fn minified() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }

    /// The string used for one level of indentation.
    pub fn indent(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.tab_size.get())
        }
    }
}

impl Default for Formatting {
    fn default() -> Self {
        Self {
            pretty: true,
            use_tabs: false,
            tab_size: DEFAULT_TAB_SIZE,
        }
    }
}

/// Render `entries` as a rule block under `selector`.
///
/// Returns an empty string when there is nothing to declare; callers must
/// not emit an empty rule block.
pub fn render(entries: &[FlatEntry], selector: &str, formatting: &Formatting) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut css = String::with_capacity(selector.len() + entries.len() * 32);
    css.push_str(selector);
    css.push_str(" {");

    if formatting.pretty {
        let indent = formatting.indent();
        for entry in entries {
            css.push('\n');
            css.push_str(&indent);
            push_declaration(&mut css, entry);
        }
        css.push('\n');
    } else {
        for entry in entries {
            push_declaration(&mut css, entry);
        }
    }

    css.push('}');
    css
}

fn push_declaration(css: &mut String, entry: &FlatEntry) {
    css.push_str("--");
    css.push_str(&entry.name);
    css.push_str(": ");
    css.push_str(&render_value(&entry.value));
    css.push(';');
}

/// Textual form of a value inside a declaration.
pub fn render_value(value: &CssValue) -> String {
    if !value.needs_quotes() {
        return value.text.clone();
    }

    let mut quoted = String::with_capacity(value.text.len() + 2);
    quoted.push('"');
    for ch in value.text.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}
