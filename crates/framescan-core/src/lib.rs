mod analyze;
pub mod config;
pub mod decompose;
mod detector;
pub mod error;
mod filter;
pub mod frame_range;
pub mod item;
pub mod options;
pub mod pattern;
mod scanner;
pub mod sequence;

pub use config::AppConfig;
pub use detector::{
    browse, file_objects_in, files_and_sequences_in, files_in, folders_in,
    sequences_from_filename_list, sequences_in,
};
pub use error::Error;
pub use frame_range::{FrameRange, Time};
pub use item::{classify, FileMeta, FileObject, Item, ItemType};
pub use options::{DetectOptions, TypeMask};
pub use pattern::{check_pattern, parse_pattern, PatternFlavor, PatternFlavors, PatternInfo};
pub use sequence::Sequence;
