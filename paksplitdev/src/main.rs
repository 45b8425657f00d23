use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use paksplit_core::error::{Result, SplitError};
use paksplit_core::layout;
use paksplit_core::{SplitMode, SplitOptions, split};

#[derive(Parser)]
#[command(author, version, about = "Split package images into FAT32-sized parts", long_about = None)]
struct Cli {
    /// Path to the package image to split
    source: PathBuf,

    /// Split in place: consume the original instead of copying it.
    /// Needs only one part of free space; a failure mid-run cannot be undone.
    #[arg(long, conflicts_with = "output_dir")]
    in_place: bool,

    /// Write parts to this directory instead of next to the source
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            report_leftovers(&cli, &e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let opts = SplitOptions {
        mode: if cli.in_place {
            SplitMode::InPlace
        } else {
            SplitMode::Copy
        },
        output_dir: cli.output_dir.clone(),
        ..Default::default()
    };
    let report = split(&cli.source, Some(&opts))?;
    println!(
        "done: {} part(s) under {}",
        report.parts.len(),
        report.dir.display()
    );
    Ok(())
}

/// Partial output is never cleaned up; tell the user exactly what is on
/// disk so it can be inspected or discarded.
fn report_leftovers(cli: &Cli, err: &SplitError) {
    if !matches!(err, SplitError::Io(_) | SplitError::Destructive { .. }) {
        return;
    }
    let dir = match &cli.output_dir {
        Some(d) => layout::adapt_output_dir(d, &cli.source),
        None => layout::split_dir_name(&cli.source),
    };
    match layout::existing_parts(&dir) {
        Ok(parts) if !parts.is_empty() => {
            eprintln!("parts left on disk under {}:", dir.display());
            for p in parts {
                eprintln!("  {}", p.display());
            }
        }
        _ => {}
    }
}
