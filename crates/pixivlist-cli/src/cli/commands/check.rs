//! `pixivlist check [file]` – list the lines that would be skipped.

use anyhow::{Context, Result};
use pixivlist_core::manifest::{self, Severity};
use std::path::Path;

pub fn run_check(file: &Path, root_dir: Option<&str>) -> Result<()> {
    let report = manifest::parse_list_report(file, root_dir)
        .with_context(|| format!("check list {}", file.display()))?;

    for skipped in &report.skipped {
        let level = match skipped.error.severity() {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        println!("line {} [{}]: {}", skipped.line_no, level, skipped.error);
    }
    if let Some(stop) = &report.stopped {
        println!("stopped at line {}: {}", stop.line_no(), stop);
    }
    println!(
        "{}: {} entries, {} skipped{}",
        file.display(),
        report.entries.len(),
        report.skipped.len(),
        if report.stopped.is_some() { ", scan incomplete" } else { "" }
    );

    if !report.is_clean() {
        anyhow::bail!("{} has problems", file.display());
    }
    Ok(())
}
