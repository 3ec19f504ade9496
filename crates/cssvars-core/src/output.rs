//! Writing generated stylesheets to disk.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::spec::CompiledModule;

/// File name for a module id.
///
/// Keeps the part after the last `:` (dropping a `virtual:` style prefix),
/// replaces path separators with `_` and appends `.css` when missing.
pub fn module_file_name(module_id: &str) -> String {
    let name = module_id.rsplit(':').next().unwrap_or(module_id);
    let mut name: String = name
        .chars()
        .map(|ch| if ch == '/' || ch == '\\' { '_' } else { ch })
        .collect();
    if name.is_empty() {
        name.push_str("variables");
    }
    if !name.ends_with(".css") {
        name.push_str(".css");
    }
    name
}

/// Write every module with content into `out_dir`.
///
/// Modules without variables are skipped. Returns the written paths.
/// Fails without writing anything when two modules map to the same file.
pub fn write_modules(modules: &[CompiledModule], out_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();

    let mut targets: Vec<(String, &CompiledModule, &str)> = Vec::new();
    let mut owners: FxHashMap<String, &str> = FxHashMap::default();
    for module in modules {
        let Some(text) = module.text.as_deref() else {
            tracing::debug!("Skipping {}: no variables", module.module_id);
            continue;
        };

        let file_name = module_file_name(&module.module_id);
        if let Some(first) = owners.get(&file_name) {
            return Err(Error::FileNameConflict {
                file_name,
                first: first.to_string(),
                second: module.module_id.clone(),
            });
        }
        owners.insert(file_name.clone(), &module.module_id);
        targets.push((file_name, module, text));
    }

    fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    for (file_name, module, text) in targets {
        let path = out_dir.join(file_name);
        fs::write(&path, text).map_err(|e| Error::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::info!("Wrote {} → {}", module.module_id, path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_file_name() {
        assert_eq!(module_file_name("virtual:simple.css"), "simple.css");
        assert_eq!(module_file_name("theme"), "theme.css");
        assert_eq!(module_file_name("virtual:themes/dark.css"), "themes_dark.css");
        assert_eq!(module_file_name("virtual:"), "variables.css");
    }

    #[test]
    fn test_write_modules_skips_empty() {
        let dir = tempfile::tempdir().unwrap();
        let modules = vec![
            CompiledModule {
                module_id: "virtual:a.css".to_string(),
                text: Some(":root {\n  --a: 1;\n}".to_string()),
            },
            CompiledModule {
                module_id: "virtual:empty.css".to_string(),
                text: None,
            },
        ];

        let written = write_modules(&modules, dir.path().join("out")).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(
            fs::read_to_string(&written[0]).unwrap(),
            ":root {\n  --a: 1;\n}"
        );
        assert!(!dir.path().join("out").join("empty.css").exists());
    }

    fn module(id: &str) -> CompiledModule {
        CompiledModule {
            module_id: id.to_string(),
            text: Some(format!(":root {{\n  --{}: 1;\n}}", id.len())),
        }
    }

    #[test]
    fn test_write_modules_rejects_file_name_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let modules = vec![module("virtual:theme.css"), module("other:theme.css")];

        let err = write_modules(&modules, &out).unwrap_err();
        match err {
            Error::FileNameConflict {
                file_name,
                first,
                second,
            } => {
                assert_eq!(file_name, "theme.css");
                assert_eq!(first, "virtual:theme.css");
                assert_eq!(second, "other:theme.css");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!out.exists());
    }

    #[test]
    fn test_separator_replacement_can_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let modules = vec![module("virtual:a/b.css"), module("virtual:a_b.css")];

        let err = write_modules(&modules, dir.path()).unwrap_err();
        assert!(err.to_string().contains("a_b.css"));
        assert!(!dir.path().join("a_b.css").exists());
    }

    #[test]
    fn test_empty_module_does_not_claim_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let modules = vec![
            CompiledModule {
                module_id: "virtual:theme.css".to_string(),
                text: None,
            },
            module("other:theme.css"),
        ];

        let written = write_modules(&modules, dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join("theme.css")]);
    }
}
