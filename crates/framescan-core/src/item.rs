use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::sequence::Sequence;

/// Classification of one filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    File,
    Folder,
    Link,
    Sequence,
    Undefined,
}

/// Classify a path from disk. A symlink is reported as `Link` even when its
/// target is a regular file, so the link test comes first.
pub fn classify(path: &Path) -> ItemType {
    match fs::symlink_metadata(path) {
        Ok(meta) => {
            let ft = meta.file_type();
            if ft.is_symlink() {
                ItemType::Link
            } else if ft.is_file() {
                ItemType::File
            } else if ft.is_dir() {
                ItemType::Folder
            } else {
                ItemType::Undefined
            }
        }
        Err(_) => ItemType::Undefined,
    }
}

/// One classified entry: a file, folder, link, or a whole sequence rooted in
/// a directory.
#[derive(Debug, Clone)]
pub struct Item {
    item_type: ItemType,
    path: PathBuf,
    sequence: Option<Sequence>,
}

impl Item {
    pub fn new(item_type: ItemType, path: PathBuf) -> Self {
        Item {
            item_type,
            path,
            sequence: None,
        }
    }

    /// A sequence item; `directory` is the folder holding the frames.
    pub fn new_sequence(directory: PathBuf, sequence: Sequence) -> Self {
        Item {
            item_type: ItemType::Sequence,
            path: directory,
            sequence: Some(sequence),
        }
    }

    /// Classify `path` from disk.
    pub fn from_path(path: PathBuf) -> Self {
        Item {
            item_type: classify(&path),
            path,
            sequence: None,
        }
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sequence(&self) -> Option<&Sequence> {
        self.sequence.as_ref()
    }

    /// Folder holding this item: the path itself for sequences, the parent
    /// otherwise.
    pub fn folder_path(&self) -> &Path {
        if self.item_type == ItemType::Sequence {
            &self.path
        } else {
            self.path.parent().unwrap_or(&self.path)
        }
    }

    /// Absolute path of the first frame for sequences, of the entry itself
    /// otherwise.
    pub fn absolute_first_path(&self) -> PathBuf {
        match &self.sequence {
            Some(sequence) => self.path.join(sequence.first_filename()),
            None => self.path.clone(),
        }
    }

    /// Expand a sequence item into one item per frame, re-classified from
    /// disk. Frames missing on disk are skipped. Non-sequence items explode
    /// to nothing.
    pub fn explode(&self) -> Vec<Item> {
        let Some(sequence) = &self.sequence else {
            return Vec::new();
        };
        let mut items = Vec::new();
        for filename in sequence.files() {
            let path = self.path.join(filename);
            match fs::symlink_metadata(&path) {
                Ok(_) => items.push(Item::from_path(path)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => debug!("Skipping {}: {}", path.display(), e),
            }
        }
        items
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sequence {
            Some(sequence) => write!(f, "{}", self.path.join(sequence.to_string()).display()),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

/// Directory and filename of a detected entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub directory: PathBuf,
    pub filename: String,
}

impl FileMeta {
    pub fn new(directory: PathBuf, filename: String) -> Self {
        FileMeta {
            directory,
            filename,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

impl fmt::Display for FileMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

/// A detected entry: plain file, folder, or sequence. For sequences the
/// meta filename is the standard pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum FileObject {
    File(FileMeta),
    Folder(FileMeta),
    Sequence(FileMeta, Sequence),
}

impl FileObject {
    pub fn meta(&self) -> &FileMeta {
        match self {
            FileObject::File(meta) | FileObject::Folder(meta) | FileObject::Sequence(meta, _) => {
                meta
            }
        }
    }

    pub fn path(&self) -> PathBuf {
        self.meta().path()
    }

    pub fn sequence(&self) -> Option<&Sequence> {
        match self {
            FileObject::Sequence(_, sequence) => Some(sequence),
            _ => None,
        }
    }
}

impl fmt::Display for FileObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileObject::Sequence(meta, sequence) => {
                write!(f, "{}", meta.directory.join(sequence.to_string()).display())
            }
            other => write!(f, "{}", other.meta()),
        }
    }
}
