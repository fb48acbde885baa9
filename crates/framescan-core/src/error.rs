use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("input path does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("input path is not a directory: {}", .0.display())]
    InputNotADirectory(PathBuf),

    #[error("string matches no accepted sequence pattern: {0}")]
    PatternUnrecognized(String),
}
