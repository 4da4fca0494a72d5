use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// One order-file line: the file to copy and the input directory it was
/// discovered under. Paths containing `;` are unsupported by the format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub source: PathBuf,
    pub base_dir: PathBuf,
}

pub fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create order file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        writeln!(
            writer,
            "{};{}",
            record.source.display(),
            record.base_dir.display()
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read order file {}", path.display()))?;
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let mut fields = line.split(';');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(source), Some(base_dir), None) => records.push(Record {
                source: PathBuf::from(source),
                base_dir: PathBuf::from(base_dir),
            }),
            _ => bail!(
                "invalid record on line {} of {}: expected <source>;<baseDir>",
                idx + 1,
                path.display()
            ),
        }
    }
    Ok(records)
}
