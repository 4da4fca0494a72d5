use crate::manifest;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct CopyOptions {
    pub clean_spaces: bool,
}

/// Replays an order file: each source is recreated under `target` at its
/// path relative to the recorded base directory. Fail-fast by design; the
/// first I/O problem aborts the remaining queue, and files already copied
/// stay in place.
pub fn run(order_file: &Path, target: &Path, options: &CopyOptions) -> Result<()> {
    if !target.is_dir() {
        bail!("target must be an existing directory: {}", target.display());
    }

    let records = manifest::read_records(order_file)?;
    for record in records {
        let relative = record.source.strip_prefix(&record.base_dir).with_context(|| {
            format!(
                "{} is not under its base directory {}",
                record.source.display(),
                record.base_dir.display()
            )
        })?;
        let relative: PathBuf = if options.clean_spaces {
            PathBuf::from(relative.to_string_lossy().replace(' ', "_"))
        } else {
            relative.to_path_buf()
        };

        let destination = target.join(&relative);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        if destination.exists() {
            bail!("destination already exists: {}", destination.display());
        }
        fs::copy(&record.source, &destination).with_context(|| {
            format!(
                "failed to copy {} to {}",
                record.source.display(),
                destination.display()
            )
        })?;
        println!("Copied: {}", destination.display());
    }
    Ok(())
}
