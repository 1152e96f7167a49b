//! `pixivlist parse [file]` – print the entries of a list file.

use anyhow::{Context, Result};
use pixivlist_core::manifest;
use std::path::Path;

pub fn run_parse(file: &Path, root_dir: Option<&str>, json: bool) -> Result<()> {
    let entries = manifest::parse_list(file, root_dir)
        .with_context(|| format!("parse list {}", file.display()))?;

    if json {
        for entry in &entries {
            println!("{}", serde_json::to_string(entry)?);
        }
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries in {}.", file.display());
    } else {
        println!("{:<12} {:<8} {}", "ID", "KIND", "PATH");
        for e in &entries {
            let kind = if e.is_content_id() { "content" } else { "member" };
            let path = if e.path().is_empty() { "-" } else { e.path() };
            println!("{:<12} {:<8} {}", e.id(), kind, path);
        }
    }
    Ok(())
}
