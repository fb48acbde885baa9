//! Detection entry points: list files, folders and sequences in a directory
//! or fold a caller-supplied filename list into sequences.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::analyze::build_sequences;
use crate::decompose::{decompose_filename, recompose};
use crate::error::Error;
use crate::filter::is_visible;
use crate::item::{FileMeta, FileObject, Item};
use crate::options::{DetectOptions, TypeMask};
use crate::scanner::{browse_directory, scan_directory, Buckets};
use crate::sequence::Sequence;

/// Plain files of a directory: entries without numeric fields, numbered
/// files that belong to no sequence, and one-frame downgrades.
pub fn files_in(
    dir: impl AsRef<Path>,
    filters: &[String],
    options: DetectOptions,
) -> Result<Vec<FileMeta>, Error> {
    let scan = scan_directory(dir.as_ref(), filters, options)?;
    let directory = scan.directory;
    let mut files = scan.files;
    let (bucket_files, _) = fold_buckets(scan.buckets, options);
    files.extend(bucket_files);
    files.sort();
    Ok(files
        .into_iter()
        .map(|filename| FileMeta::new(directory.clone(), filename))
        .collect())
}

/// Sequences of a directory, sorted by standard pattern.
pub fn sequences_in(
    dir: impl AsRef<Path>,
    filters: &[String],
    options: DetectOptions,
) -> Result<Vec<Sequence>, Error> {
    let scan = scan_directory(dir.as_ref(), filters, options)?;
    let (_, sequences) = fold_buckets(scan.buckets, options);
    debug!(
        "Detected {} sequences in {}",
        sequences.len(),
        scan.directory.display()
    );
    Ok(sequences)
}

/// Files and sequences of a directory, files first.
pub fn files_and_sequences_in(
    dir: impl AsRef<Path>,
    filters: &[String],
    options: DetectOptions,
) -> Result<Vec<FileObject>, Error> {
    file_objects_in(
        dir,
        filters,
        TypeMask::FILE | TypeMask::SEQUENCE,
        options,
    )
}

/// Subdirectories of a directory, sorted by name.
pub fn folders_in(
    dir: impl AsRef<Path>,
    filters: &[String],
    options: DetectOptions,
) -> Result<Vec<FileMeta>, Error> {
    let scan = scan_directory(dir.as_ref(), filters, options)?;
    let mut folders = scan.folders;
    folders.sort();
    Ok(folders
        .into_iter()
        .map(|filename| FileMeta::new(scan.directory.clone(), filename))
        .collect())
}

/// All entries of a directory, filtered by the type mask. Folders come
/// first, then files, then sequences.
pub fn file_objects_in(
    dir: impl AsRef<Path>,
    filters: &[String],
    mask: TypeMask,
    options: DetectOptions,
) -> Result<Vec<FileObject>, Error> {
    let scan = scan_directory(dir.as_ref(), filters, options)?;
    let directory = scan.directory;
    let mut output = Vec::new();

    if mask.contains(TypeMask::DIRECTORY) {
        let mut folders = scan.folders;
        folders.sort();
        output.extend(
            folders
                .into_iter()
                .map(|name| FileObject::Folder(FileMeta::new(directory.clone(), name))),
        );
    }

    let (mut files, sequences) = fold_buckets(scan.buckets, options);
    if mask.contains(TypeMask::FILE) {
        files.extend(scan.files);
        files.sort();
        output.extend(
            files
                .into_iter()
                .map(|name| FileObject::File(FileMeta::new(directory.clone(), name))),
        );
    }
    if mask.contains(TypeMask::SEQUENCE) {
        output.extend(sequences.into_iter().map(|sequence| {
            let meta = FileMeta::new(directory.clone(), sequence.standard_pattern());
            FileObject::Sequence(meta, sequence)
        }));
    }
    Ok(output)
}

/// Fold a caller-supplied filename list into sequences; no filesystem
/// access. Only the final path component of each entry is considered.
pub fn sequences_from_filename_list(
    filenames: &[PathBuf],
    options: DetectOptions,
) -> Vec<Sequence> {
    let mut buckets = Buckets::default();
    if options.contains(DetectOptions::SEQUENCE_BASED_ON_NUMBERS) {
        for path in filenames {
            let Some(filename) = path.file_name() else {
                continue;
            };
            let filename = filename.to_string_lossy();
            if !is_visible(&filename, options) {
                continue;
            }
            if let Some((skeleton, numbers)) = decompose_filename(&filename, options) {
                buckets.entry(skeleton).or_default().push(numbers);
            }
        }
    }
    let (_, sequences) = fold_buckets(buckets, options);
    sequences
}

/// Enumerate a directory tree, classify every entry and fold same-skeleton
/// regular files into sequence items.
pub fn browse(dir: impl AsRef<Path>, recursive: bool) -> Result<Vec<Item>, Error> {
    browse_directory(dir.as_ref(), recursive)
}

/// Resolve buckets into plain filenames and sequences, both sorted.
///
/// A singleton bucket is a file, not a sequence, unless detection is based
/// on the filename alone; the same applies to one-frame splits of a larger
/// bucket.
fn fold_buckets(buckets: Buckets, options: DetectOptions) -> (Vec<String>, Vec<Sequence>) {
    let keep_single = options.contains(DetectOptions::SEQUENCE_BASED_ON_FILENAME);
    let mut files = Vec::new();
    let mut sequences = Vec::new();

    for (skeleton, bucket) in buckets {
        if bucket.len() == 1 && !keep_single {
            files.push(recompose(&skeleton, &bucket[0]));
            continue;
        }
        for sequence in build_sequences(&skeleton, &bucket) {
            if sequence.nb_files() == 1 && !keep_single {
                files.push(sequence.first_filename());
            } else {
                sequences.push(sequence);
            }
        }
    }
    files.sort();
    sequences.sort();
    (files, sequences)
}
