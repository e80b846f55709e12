//! Console output utilities.

use console::{style, Term};

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Clear the terminal if enabled and stdout is a terminal.
pub fn clear_console(enabled: bool) {
    let term = Term::stdout();
    if enabled && term.is_term() {
        if let Err(e) = term.clear_screen() {
            tracing::debug!("Failed to clear console: {}", e);
        }
    }
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Parentzone Archiver                               ║
║     Posts and gallery media, kept in sync             ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(mode: &str, output_dir: &str, api_base: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Mode: {}", mode);
    println!("  Directory: {}", output_dir);
    println!("  API: {}", api_base);
    println!();
}
