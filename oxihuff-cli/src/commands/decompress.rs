//! Decompress command implementation.

use crate::utils::{config_for, create_spinner, format_size};
use oxihuff::decompress_file;
use std::path::Path;

pub fn cmd_decompress(
    input: &Path,
    output: &Path,
    legacy: bool,
    json: bool,
    verbose: bool,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner(format!("Decompressing {}", input.display()), progress && !json);
    let result = decompress_file(input, output, config_for(legacy));
    pb.finish_and_clear();
    let report = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if verbose {
        println!("Decompressed {} -> {}", input.display(), output.display());
        println!("Bits decoded: {}", report.bits_decoded);
    }
    println!(
        "Compressed size: {} bytes ({})",
        report.compressed_size,
        format_size(report.compressed_size)
    );
    println!(
        "Decompressed size: {} bytes ({})",
        report.decompressed_size,
        format_size(report.decompressed_size)
    );

    Ok(())
}
