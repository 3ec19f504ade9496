//! Check command implementation for cssvars CLI.

use cssvars_core::Severity;

use crate::colors;

/// Compile the options and report every diagnostic.
pub fn execute(options_path: &str) -> anyhow::Result<()> {
    let modules = crate::load_modules(options_path)?;

    println!(
        "\n{}cssvars Check{} - {}",
        colors::BOLD,
        colors::RESET,
        options_path
    );
    println!("{}", "─".repeat(50));

    for diagnostic in modules.diagnostics() {
        let (color, label) = match diagnostic.severity() {
            Severity::Error => (colors::RED, "error"),
            Severity::Warning => (colors::YELLOW, "warning"),
        };
        println!("  {}{}{}: {}", color, label, colors::RESET, diagnostic);
    }

    let total = modules.modules().len();
    let empty = modules.modules().iter().filter(|m| m.is_empty()).count();
    println!(
        "{}{} module(s){}, {} without variables",
        colors::GREEN,
        total,
        colors::RESET,
        empty
    );

    crate::ensure_no_errors(&modules)
}
