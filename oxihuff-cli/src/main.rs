//! OxiHuff CLI - The Oxidized Huffman coder
//!
//! Compresses a file with a static Huffman code and restores it.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{cmd_compress, cmd_decompress, cmd_info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(
    author,
    version,
    about = "The Oxidized Huffman coder - Pure Rust static Huffman compression"
)]
#[command(long_about = "
OxiHuff compresses a byte stream with a static Huffman code. The code tree
is stored in the artifact, so no side channel is needed to decompress it.

Examples:
  oxihuff compress notes.txt notes.huff
  oxihuff decompress notes.huff notes.txt
  oxihuff info notes.huff
  oxihuff compress --legacy notes.txt notes.huff

Set RUST_LOG (e.g. RUST_LOG=oxihuff=trace) for diagnostics on stderr.
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a Huffman artifact
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Artifact to create
        output: PathBuf,

        /// Write the legacy layout (no stored bit count)
        #[arg(long)]
        legacy: bool,

        /// Print the report as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Show a progress spinner
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Restore the original file from an artifact
    #[command(visible_alias = "d", alias = "x")]
    Decompress {
        /// Artifact to decompress
        input: PathBuf,

        /// File to create
        output: PathBuf,

        /// Read the legacy layout (no stored bit count)
        #[arg(long)]
        legacy: bool,

        /// Print the report as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Show a progress spinner
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Show the header of an artifact: tree shape and code table
    #[command(alias = "i")]
    Info {
        /// Artifact to inspect
        artifact: PathBuf,

        /// Parse the legacy layout (no stored bit count)
        #[arg(long)]
        legacy: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Commands::Compress { verbose, .. } | Commands::Decompress { verbose, .. } => *verbose,
        Commands::Info { .. } => false,
    };
    utils::init_tracing(verbose);

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            legacy,
            json,
            verbose,
            progress,
        } => cmd_compress(&input, &output, legacy, json, verbose, progress),
        Commands::Decompress {
            input,
            output,
            legacy,
            json,
            verbose,
            progress,
        } => cmd_decompress(&input, &output, legacy, json, verbose, progress),
        Commands::Info {
            artifact,
            legacy,
            json,
        } => cmd_info(&artifact, legacy, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
