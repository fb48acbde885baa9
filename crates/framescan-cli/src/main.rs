mod commands;
mod logging;

use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use framescan_core::{
    browse, files_and_sequences_in, folders_in, sequences_in, AppConfig, DetectOptions,
    FileObject, Item, ItemType, PatternFlavors, Sequence,
};
use tracing::error;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match framescan_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();
    let options = detect_options(&config, &args);

    let result = match args.command {
        Some(Commands::Sequences { ref path, ref filter }) => {
            run_sequences(&target(path, &config), filter, options)
        }
        Some(Commands::List { ref path, ref filter }) => {
            run_list(&target(path, &config), filter, options)
        }
        Some(Commands::Folders { ref path }) => run_folders(&target(path, &config), options),
        Some(Commands::Browse { ref path, recursive }) => {
            run_browse(&target(path, &config), recursive)
        }
        Some(Commands::Explode {
            ref path,
            ref pattern,
            first,
            last,
            step,
        }) => run_explode(path, pattern, first, last, step),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
            Ok(())
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = result {
        error!("Error: {}", err);
        process::exit(1);
    }

    Ok(())
}

fn detect_options(config: &AppConfig, args: &Cli) -> DetectOptions {
    let mut options = config.detect_options();
    if args.dot_files {
        options |= DetectOptions::DOT_FILE;
    }
    if args.negative {
        options |= DetectOptions::NEGATIVE;
    }
    options
}

fn target(path: &Option<String>, config: &AppConfig) -> PathBuf {
    path.clone()
        .or_else(|| config.root_path.clone())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn run_sequences(
    dir: &Path,
    filters: &[String],
    options: DetectOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let sequences = sequences_in(dir, filters, options)?;
    for sequence in &sequences {
        println!("{}", describe_sequence(sequence));
    }
    println!(
        "{} sequences in {}",
        format!("{}", sequences.len()).green(),
        dir.display()
    );
    Ok(())
}

fn run_list(
    dir: &Path,
    filters: &[String],
    options: DetectOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let objects = files_and_sequences_in(dir, filters, options)?;
    for object in &objects {
        match object {
            FileObject::Sequence(_, sequence) => println!("{}", describe_sequence(sequence)),
            other => println!("{}", other.path().display()),
        }
    }
    Ok(())
}

fn run_folders(dir: &Path, options: DetectOptions) -> Result<(), Box<dyn std::error::Error>> {
    let folders = folders_in(dir, &[], options)?;
    for folder in &folders {
        println!("{}", folder.path().display());
    }
    Ok(())
}

fn run_browse(dir: &Path, recursive: bool) -> Result<(), Box<dyn std::error::Error>> {
    let items = browse(dir, recursive)?;
    for item in &items {
        let tag = match item.item_type() {
            ItemType::File => "file".normal(),
            ItemType::Folder => "dir ".blue(),
            ItemType::Link => "link".cyan(),
            ItemType::Sequence => "seq ".green(),
            ItemType::Undefined => "??? ".red(),
        };
        println!("{}  {}", tag, item);
    }
    Ok(())
}

fn run_explode(
    dir: &str,
    pattern: &str,
    first: i64,
    last: i64,
    step: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let sequence = Sequence::from_pattern(pattern, first, last, step, PatternFlavors::ALL)?;
    let item = Item::new_sequence(PathBuf::from(dir), sequence);
    for frame in item.explode() {
        println!("{}", frame.path().display());
    }
    Ok(())
}

fn describe_sequence(sequence: &Sequence) -> String {
    let missing = if sequence.has_missing_file() {
        format!(" ({} missing)", sequence.nb_missing_files()).red().to_string()
    } else {
        String::new()
    };
    format!(
        "{} {} files{}",
        sequence,
        format!("{}", sequence.nb_files()).green(),
        missing
    )
}
