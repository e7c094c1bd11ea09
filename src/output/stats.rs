//! Statistics reporting.

use console::style;

use crate::download::RunReport;

/// Print statistics for a finished collection run.
pub fn print_run_stats(report: &RunReport) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!(
        "{}",
        style(format!("Statistics for {}:", report.collection_title)).bold()
    );
    println!("  Directory:  {}", report.target_dir.display());
    println!("  Pages:      {}", report.pages_fetched);
    println!("  Downloaded: {}", style(report.assets_downloaded).green());
    println!("  Existing:   {} (skipped)", report.assets_existing);
    println!(
        "  Info files: {} written, {} existing",
        report.info_files_written, report.info_files_existing
    );
    if report.info_files_failed > 0 {
        println!(
            "              {} failed",
            style(report.info_files_failed).red()
        );
    }
    if report.items_without_asset > 0 {
        println!(
            "  No asset:   {}",
            style(report.items_without_asset).yellow()
        );
    }
    if report.items_failed > 0 {
        println!("  Failed:     {}", style(report.items_failed).red());
    }
    if let Some(reason) = &report.stopped {
        println!("  Stopped:    {}", style(reason).yellow());
    }
    println!("{}", style("═".repeat(50)).dim());
}
