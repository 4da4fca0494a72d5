use anyhow::{Context, Result};
use lofty::{ItemKey, TaggedFileExt};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Track placement parsed from a file's embedded tags. Either field may be
/// missing independently; a file that decodes but carries neither is still
/// "tagged" for ordering purposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub disc: Option<u32>,
    pub track: Option<u32>,
}

/// Pluggable tag source. `Ok(None)` means "no usable metadata" (wrong file
/// type, undecodable tags); `Err` is reserved for I/O failures, which abort
/// the whole ordering run.
pub trait TagReader {
    fn read(&self, path: &Path) -> Result<Option<TrackTags>>;
}

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

/// Tag reader backed by lofty.
pub struct LoftyReader;

impl TagReader for LoftyReader {
    fn read(&self, path: &Path) -> Result<Option<TrackTags>> {
        if !path.is_file() || !is_audio_file(path) {
            return Ok(None);
        }

        let tagged = match lofty::read_from_path(path) {
            Ok(tagged) => tagged,
            Err(err) => {
                if matches!(err.kind(), lofty::error::ErrorKind::Io(_)) {
                    return Err(err)
                        .with_context(|| format!("failed to read {}", path.display()));
                }
                eprintln!("Unable to read tags of {}: {err}", path.display());
                return Ok(None);
            }
        };

        let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
            return Ok(Some(TrackTags::default()));
        };

        let track = tag
            .get_string(&ItemKey::TrackNumber)
            .and_then(|raw| parse_tag_number(path, "track", raw));
        let disc = tag
            .get_string(&ItemKey::DiscNumber)
            .and_then(|raw| parse_tag_number(path, "disc", raw));

        Ok(Some(TrackTags { disc, track }))
    }
}

/// Parses a numeric tag field. Composite values like "3/12" count only the
/// part before the separator; an unparsable value becomes absent, with a
/// diagnostic.
fn parse_tag_number(path: &Path, field: &str, raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let leading = raw.split('/').next().unwrap_or(raw);
    match leading.trim().parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            eprintln!("Unable to parse {field} number of {}", path.display());
            None
        }
    }
}

/// Per-run memo of tag reads, so sorting never parses the same file twice.
/// Misses are stored too. A reader I/O error is latched (first one wins) and
/// the path is recorded as untagged so the comparator stays a total order;
/// callers must check `take_error` after sorting.
pub struct MetadataCache<R> {
    reader: R,
    entries: HashMap<PathBuf, Option<TrackTags>>,
    error: Option<anyhow::Error>,
}

impl<R: TagReader> MetadataCache<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            entries: HashMap::new(),
            error: None,
        }
    }

    pub fn get_or_read(&mut self, path: &Path) -> Option<TrackTags> {
        if let Some(hit) = self.entries.get(path) {
            return *hit;
        }
        let tags = match self.reader.read(path) {
            Ok(tags) => tags,
            Err(err) => {
                if self.error.is_none() {
                    self.error = Some(err);
                }
                None
            }
        };
        self.entries.insert(path.to_path_buf(), tags);
        tags
    }

    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }
}
