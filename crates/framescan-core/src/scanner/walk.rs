use ahash::AHashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::analyze::build_sequences;
use crate::decompose::{decompose_filename, recompose, FileNumbers, FileStrings};
use crate::error::Error;
use crate::filter::{compile_filters, filename_matches, is_visible};
use crate::item::{classify, Item, ItemType};
use crate::options::DetectOptions;

/// Candidate sequence members, keyed by their string skeleton.
pub(crate) type Buckets = AHashMap<FileStrings, Vec<FileNumbers>>;

/// Result of enumerating one directory: plain files, subfolders and the
/// buckets of numbered filenames.
pub(crate) struct ScanOutcome {
    pub directory: PathBuf,
    pub files: Vec<String>,
    pub folders: Vec<String>,
    pub buckets: Buckets,
}

/// Enumerate one directory, applying visibility and filters. Numbered
/// filenames land in buckets; everything else is a plain file or a folder.
/// Per-entry parse failures never propagate; whole-directory failures do.
pub(crate) fn scan_directory(
    dir: &Path,
    filters: &[String],
    options: DetectOptions,
) -> Result<ScanOutcome, Error> {
    let directory = resolve_directory(dir)?;
    let filters = compile_filters(filters);
    let group = options.contains(DetectOptions::SEQUENCE_BASED_ON_NUMBERS);

    let mut outcome = ScanOutcome {
        directory,
        files: Vec::new(),
        folders: Vec::new(),
        buckets: Buckets::default(),
    };

    for entry in fs::read_dir(&outcome.directory)? {
        let entry = entry?;
        let filename = entry.file_name().to_string_lossy().into_owned();
        if !is_visible(&filename, options) || !filename_matches(&filename, &filters) {
            continue;
        }
        if entry.file_type()?.is_dir() {
            outcome.folders.push(filename);
        } else if group {
            match decompose_filename(&filename, options) {
                Some((skeleton, numbers)) => {
                    outcome.buckets.entry(skeleton).or_default().push(numbers);
                }
                None => outcome.files.push(filename),
            }
        } else {
            outcome.files.push(filename);
        }
    }
    debug!(
        "Scanned {}: {} plain files, {} folders, {} skeletons",
        outcome.directory.display(),
        outcome.files.len(),
        outcome.folders.len(),
        outcome.buckets.len(),
    );
    Ok(outcome)
}

/// Enumerate a directory tree, classify every entry and fold regular files
/// into sequences.
pub(crate) fn browse_directory(dir: &Path, recursive: bool) -> Result<Vec<Item>, Error> {
    let directory = resolve_directory(dir)?;
    let mut items = Vec::new();
    browse_into(&directory, recursive, DetectOptions::default(), &mut items)?;
    items.sort_by_key(item_sort_key);
    Ok(items)
}

fn browse_into(
    directory: &Path,
    recursive: bool,
    options: DetectOptions,
    items: &mut Vec<Item>,
) -> Result<(), Error> {
    let mut buckets = Buckets::default();
    let mut subdirs: Vec<PathBuf> = Vec::new();

    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let filename = entry.file_name().to_string_lossy().into_owned();
        if !is_visible(&filename, options) {
            continue;
        }
        let path = entry.path();
        match classify(&path) {
            ItemType::Folder => {
                subdirs.push(path.clone());
                items.push(Item::new(ItemType::Folder, path));
            }
            // only regular files fold into sequences; a link keeps its
            // own identity even when named like a frame
            ItemType::File => match decompose_filename(&filename, options) {
                Some((skeleton, numbers)) => {
                    buckets.entry(skeleton).or_default().push(numbers);
                }
                None => items.push(Item::new(ItemType::File, path)),
            },
            other => items.push(Item::new(other, path)),
        }
    }

    for (skeleton, bucket) in buckets {
        if bucket.len() == 1 {
            let filename = recompose(&skeleton, &bucket[0]);
            items.push(Item::new(ItemType::File, directory.join(filename)));
            continue;
        }
        for sequence in build_sequences(&skeleton, &bucket) {
            if sequence.nb_files() == 1 {
                items.push(Item::new(ItemType::File, directory.join(sequence.first_filename())));
            } else {
                items.push(Item::new_sequence(directory.to_path_buf(), sequence));
            }
        }
    }

    if recursive {
        for subdir in subdirs {
            browse_into(&subdir, recursive, options, items)?;
        }
    }
    Ok(())
}

fn item_sort_key(item: &Item) -> (PathBuf, String) {
    let pattern = item
        .sequence()
        .map(|s| s.standard_pattern())
        .unwrap_or_default();
    (item.path().to_path_buf(), pattern)
}

/// Existence and directory checks for a detection root, with the canonical
/// path on success.
fn resolve_directory(dir: &Path) -> Result<PathBuf, Error> {
    let metadata = match fs::metadata(dir) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::InputNotFound(dir.to_path_buf()))
        }
        Err(e) => return Err(Error::Io(e)),
    };
    if !metadata.is_dir() {
        return Err(Error::InputNotADirectory(dir.to_path_buf()));
    }
    Ok(fs::canonicalize(dir)?)
}
