//! Render and bundle commands for cssvars CLI.
//!
//! Both print generated CSS to stdout and nothing else.

/// Print a single module.
pub fn execute(options_path: &str, module_id: &str) -> anyhow::Result<()> {
    let modules = crate::load_modules(options_path)?;
    crate::ensure_no_errors(&modules)?;

    if !modules.resolve(module_id) {
        anyhow::bail!("Unknown module id: {}", module_id);
    }

    match modules.load(module_id) {
        Some(css) => println!("{}", css),
        None => tracing::info!("Module {} declares no variables", module_id),
    }

    Ok(())
}

/// Print several modules concatenated in request order.
pub fn bundle(options_path: &str, module_ids: &[String]) -> anyhow::Result<()> {
    let modules = crate::load_modules(options_path)?;
    crate::ensure_no_errors(&modules)?;

    if let Some(unknown) = module_ids.iter().find(|id| !modules.resolve(id)) {
        anyhow::bail!("Unknown module id: {}", unknown);
    }

    if let Some(css) = modules.bundle(module_ids.iter().map(String::as_str)) {
        println!("{}", css);
    }

    Ok(())
}
