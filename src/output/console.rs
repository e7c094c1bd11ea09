//! Console output utilities.

use std::path::Path;

use console::style;

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

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Raindrop Images DL                                ║
║     Download images from Raindrop.io collections      ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(collection_id: i64, output_dir: &Path, write_info_json: bool) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Collection: {}", collection_id);
    println!("  Directory:  {}", output_dir.display());
    println!(
        "  Info JSON:  {}",
        if write_info_json { "enabled" } else { "disabled" }
    );
    println!();
}
