use crate::manifest::{self, Record};
use crate::metadata::{is_audio_file, LoftyReader, TagReader};
use crate::ordering::{FileComparator, OrderMode};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use walkdir::WalkDir;

pub struct OrderConfig {
    pub mode: OrderMode,
    pub audio_only: bool,
    pub order_file: PathBuf,
}

pub fn run(dirs: &[PathBuf], config: &OrderConfig) -> Result<()> {
    let records = build_order(dirs, config, LoftyReader)?;
    manifest::write_records(&config.order_file, &records)?;
    for record in &records {
        println!("{}", record.source.display());
    }
    Ok(())
}

/// Walks every input directory and produces the sorted record list. Walk
/// errors are logged and skipped so one unreadable subtree does not sink the
/// remaining inputs; a tag-read I/O error aborts before anything is written.
fn build_order<R: TagReader>(
    dirs: &[PathBuf],
    config: &OrderConfig,
    reader: R,
) -> Result<Vec<Record>> {
    // path -> base directory; re-insertion means the last input dir wins.
    let mut entries: HashMap<PathBuf, PathBuf> = HashMap::new();

    for dir in dirs {
        let base = std::path::absolute(dir)
            .with_context(|| format!("failed to resolve input directory {}", dir.display()))?;
        for entry in WalkDir::new(&base) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    eprintln!("Skipping entry under {}: {err}", base.display());
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if config.audio_only && !is_audio_file(entry.path()) {
                continue;
            }
            entries.insert(entry.path().to_path_buf(), base.clone());
        }
    }

    let mut comparator = FileComparator::new(config.mode, reader);
    let mut ordered: Vec<(PathBuf, PathBuf)> = entries.into_iter().collect();
    ordered.sort_by(|(a, _), (b, _)| comparator.compare(a, b));
    if let Some(err) = comparator.take_error() {
        return Err(err);
    }

    Ok(ordered
        .into_iter()
        .map(|(source, base_dir)| Record { source, base_dir })
        .collect())
}
