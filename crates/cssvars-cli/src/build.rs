//! Build command implementation for cssvars CLI.
//!
//! Writes every module that declares variables to the output directory.

use std::path::Path;
use std::time::Instant;

use cssvars_core::write_modules;

use crate::colors;

/// Execute the build command.
pub fn execute(options_path: &str, out_dir: &str) -> anyhow::Result<()> {
    let start = Instant::now();

    let modules = crate::load_modules(options_path)?;
    crate::ensure_no_errors(&modules)?;

    println!(
        "\n{}cssvars Build{} - {}",
        colors::BOLD,
        colors::RESET,
        options_path
    );
    println!("{}", "─".repeat(50));

    let written = write_modules(modules.modules(), Path::new(out_dir))?;
    for module in modules.modules() {
        if module.is_empty() {
            println!(
                "  {}{} (no variables, skipped){}",
                colors::DIM,
                module.module_id,
                colors::RESET
            );
        } else {
            println!("  {}✓{} {}", colors::GREEN, colors::RESET, module.module_id);
        }
    }

    let warnings = modules.diagnostics().len();
    println!("{}", "─".repeat(50));
    println!(
        "{}Wrote{} {} stylesheet(s) to {} in {:.2}ms{}",
        colors::GREEN,
        colors::RESET,
        written.len(),
        out_dir,
        start.elapsed().as_secs_f64() * 1000.0,
        if warnings > 0 {
            format!(" ({}{} warning(s){})", colors::YELLOW, warnings, colors::RESET)
        } else {
            String::new()
        }
    );

    Ok(())
}
