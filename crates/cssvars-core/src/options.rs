//! Loading module options from JSON.
//!
//! An options file holds either a single options object or an array of them:
//!
//! ```json
//! [
//!   { "moduleId": "virtual:theme.css", "variables": { "color": { "blue": "#00f" } } },
//!   { "moduleId": "virtual:print.css", "variables": [{ "gap": "1rem" }], "pretty": false }
//! ]
//! ```
//!
//! Options are converted as-is. Empty ids, duplicate ids and malformed
//! variables are reported as diagnostics at compile time, not here.

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::flatten::{DEFAULT_SELF_KEY, DEFAULT_SEPARATOR};
use crate::node::VariableNode;
use crate::render::{DEFAULT_SELECTOR, DEFAULT_TAB_SIZE, Formatting};
use crate::spec::ModuleSpec;

/// Options for one virtual module, as written in an options file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOptions {
    /// Virtual module id. Anything but a string counts as missing.
    #[serde(default, deserialize_with = "lenient_module_id")]
    pub module_id: Option<String>,

    /// A variable map, or an array of variable maps merged in order.
    /// Missing or `null` means no variables.
    #[serde(default)]
    pub variables: Option<Value>,

    #[serde(default = "default_separator")]
    pub separator: String,

    #[serde(default = "default_selector")]
    pub selector: String,

    #[serde(default = "default_true")]
    pub pretty: bool,

    #[serde(default)]
    pub use_tabs: bool,

    #[serde(default = "default_tab_size")]
    pub tab_size: NonZeroUsize,

    /// Key naming its parent's own value; `null` disables the convention.
    #[serde(default = "default_self_key")]
    pub default_key: Option<String>,
}

fn lenient_module_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(Some(id)),
        Value::Null => Ok(None),
        other => {
            tracing::debug!("Ignoring non-string moduleId: {}", other);
            Ok(None)
        }
    }
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_selector() -> String {
    DEFAULT_SELECTOR.to_string()
}

fn default_true() -> bool {
    true
}

fn default_tab_size() -> NonZeroUsize {
    DEFAULT_TAB_SIZE
}

fn default_self_key() -> Option<String> {
    Some(DEFAULT_SELF_KEY.to_string())
}

impl From<ModuleOptions> for ModuleSpec {
    fn from(options: ModuleOptions) -> Self {
        let sources = match options.variables {
            None => Vec::new(),
            Some(Value::Array(items)) => items.into_iter().map(VariableNode::from).collect(),
            Some(value) => vec![VariableNode::from(value)],
        };

        ModuleSpec {
            module_id: options.module_id,
            sources,
            separator: options.separator,
            selector: options.selector,
            self_key: options.default_key,
            formatting: Formatting {
                pretty: options.pretty,
                use_tabs: options.use_tabs,
                tab_size: options.tab_size,
            },
        }
    }
}

/// Parse module specs from JSON text.
pub fn parse_options(json: &str) -> Result<Vec<ModuleSpec>> {
    let value: Value = serde_json::from_str(json)?;
    let options: Vec<ModuleOptions> = match value {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value::<ModuleOptions>)
            .collect::<std::result::Result<Vec<_>, _>>()?,
        other => vec![serde_json::from_value(other)?],
    };
    Ok(options.into_iter().map(ModuleSpec::from).collect())
}

/// Load module specs from a JSON options file.
pub fn load_options(path: impl AsRef<Path>) -> Result<Vec<ModuleSpec>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let specs = parse_options(&json)?;
    tracing::debug!("Loaded {} module options from {}", specs.len(), path.display());
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::VariableMap;

    #[test]
    fn test_single_object_with_defaults() {
        let specs = parse_options(
            r#"{"moduleId": "virtual:simple.css", "variables": {"box-shadow": "V"}}"#,
        )
        .unwrap();

        assert_eq!(specs.len(), 1);
        let spec = &specs[0];
        assert_eq!(spec.id(), Some("virtual:simple.css"));
        assert_eq!(spec.sources.len(), 1);
        assert_eq!(spec.separator, "-");
        assert_eq!(spec.selector, ":root");
        assert_eq!(spec.self_key.as_deref(), Some("default"));
        assert_eq!(spec.formatting, Formatting::default());
    }

    #[test]
    fn test_array_of_options_with_settings() {
        let specs = parse_options(
            r#"[
                {"moduleId": "a", "variables": {}, "separator": "_", "selector": "body"},
                {"moduleId": "b", "variables": {}, "pretty": false, "useTabs": true, "tabSize": 8, "defaultKey": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].separator, "_");
        assert_eq!(specs[0].selector, "body");
        assert!(!specs[1].formatting.pretty);
        assert!(specs[1].formatting.use_tabs);
        assert_eq!(specs[1].formatting.tab_size.get(), 8);
        assert_eq!(specs[1].self_key, None);
    }

    #[test]
    fn test_variables_array_becomes_sources() {
        let specs =
            parse_options(r#"{"moduleId": "a", "variables": [{"x": "1"}, {"y": "2"}]}"#).unwrap();
        assert_eq!(specs[0].sources.len(), 2);

        let specs = parse_options(r#"{"moduleId": "a", "variables": []}"#).unwrap();
        assert!(specs[0].sources.is_empty());

        let specs = parse_options(r#"{"moduleId": "a", "variables": {}}"#).unwrap();
        assert_eq!(specs[0].sources, vec![VariableNode::Map(VariableMap::new())]);
    }

    #[test]
    fn test_missing_or_null_module_id_is_accepted() {
        let specs = parse_options(r#"[{"variables": {}}, {"moduleId": null}]"#).unwrap();
        assert_eq!(specs.len(), 2);
        assert!(specs.iter().all(|spec| spec.id().is_none()));
    }

    #[test]
    fn test_non_string_module_id_is_treated_as_missing() {
        let specs = parse_options(
            r#"[{"moduleId": 5, "variables": {}}, {"moduleId": "ok", "variables": {}}]"#,
        )
        .unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].id(), None);
        assert_eq!(specs[1].id(), Some("ok"));
    }

    #[test]
    fn test_zero_tab_size_is_rejected() {
        let err = parse_options(r#"{"moduleId": "a", "tabSize": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Options(_)));
    }

    #[test]
    fn test_load_options_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vars.json");
        fs::write(&path, r#"{"moduleId": "virtual:a.css", "variables": {"a": "1"}}"#).unwrap();

        let specs = load_options(&path).unwrap();
        assert_eq!(specs[0].id(), Some("virtual:a.css"));
    }

    #[test]
    fn test_load_options_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_options(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
