mod walk;

pub(crate) use walk::{browse_directory, scan_directory, Buckets};
