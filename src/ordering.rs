use crate::metadata::{MetadataCache, TagReader, TrackTags};
use clap::ValueEnum;
use std::cmp::Ordering;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderMode {
    /// Directory, then filename.
    Natural,
    /// Directory, then embedded disc/track numbers, then filename.
    Track,
}

/// Total order over absolute file paths. Directory grouping always wins;
/// metadata only ever reorders siblings within one directory, via the
/// embedded cache so each file is parsed at most once per run.
pub struct FileComparator<R> {
    mode: OrderMode,
    cache: MetadataCache<R>,
}

impl<R: TagReader> FileComparator<R> {
    pub fn new(mode: OrderMode, reader: R) -> Self {
        Self {
            mode,
            cache: MetadataCache::new(reader),
        }
    }

    pub fn compare(&mut self, a: &Path, b: &Path) -> Ordering {
        let dir_a = a.parent().unwrap_or_else(|| Path::new(""));
        let dir_b = b.parent().unwrap_or_else(|| Path::new(""));
        let by_dir = dir_a.as_os_str().cmp(dir_b.as_os_str());
        if by_dir != Ordering::Equal {
            return by_dir;
        }

        if self.mode == OrderMode::Track {
            match (self.cache.get_or_read(a), self.cache.get_or_read(b)) {
                (Some(ta), Some(tb)) => {
                    let by_tags = compare_tags(ta, tb);
                    if by_tags != Ordering::Equal {
                        return by_tags;
                    }
                }
                // A tagged file sorts before an untagged sibling.
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => {}
            }
        }

        let name_a = a.file_name().unwrap_or_default();
        let name_b = b.file_name().unwrap_or_default();
        name_a.cmp(name_b)
    }

    /// Fatal tag-read error observed during sorting, if any.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.cache.take_error()
    }
}

fn compare_tags(a: TrackTags, b: TrackTags) -> Ordering {
    cmp_present_first(a.disc, b.disc).then_with(|| cmp_present_first(a.track, b.track))
}

// Numeric ascending when both present; a present number beats an absent one;
// both absent decides nothing.
fn cmp_present_first(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
