use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "framescan")]
#[command(about = "Detect numbered file sequences in directories", long_about = None)]
pub struct Cli {
    /// Include filenames starting with a dot
    #[arg(long, global = true)]
    pub dot_files: bool,

    /// Detect signed frame numbers
    #[arg(long, global = true)]
    pub negative: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the sequences detected in a directory
    Sequences {
        path: Option<String>,
        /// Glob-like filename filter, repeatable
        #[arg(short, long)]
        filter: Vec<String>,
    },
    /// List files and sequences together
    List {
        path: Option<String>,
        #[arg(short, long)]
        filter: Vec<String>,
    },
    /// List subdirectories
    Folders { path: Option<String> },
    /// Classify every entry of a directory tree, folding sequences
    Browse {
        path: Option<String>,
        #[arg(short, long)]
        recursive: bool,
    },
    /// Expand a sequence pattern into the member paths present on disk
    Explode {
        path: String,
        /// Pattern such as `img.####.jpg` or `img.%04d.jpg`
        pattern: String,
        first: i64,
        last: i64,
        #[arg(long, default_value_t = 1)]
        step: i64,
    },
    /// Print configuration values
    PrintConfig,
}
