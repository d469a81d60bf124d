//! Compress command implementation.

use crate::utils::{config_for, create_spinner, format_size};
use oxihuff::compress_file;
use std::path::Path;

pub fn cmd_compress(
    input: &Path,
    output: &Path,
    legacy: bool,
    json: bool,
    verbose: bool,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_for(legacy);
    let pb = create_spinner(format!("Compressing {}", input.display()), progress && !json);
    let result = compress_file(input, output, config);
    pb.finish_and_clear();
    let report = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if verbose {
        println!("Compressed {} -> {}", input.display(), output.display());
        println!("Layout: {:?}", config.layout);
        println!("Distinct symbols: {}", report.distinct_symbols);
        println!("Payload bits: {}", report.bit_count);
    }
    println!(
        "Original size: {} bytes ({})",
        report.original_size,
        format_size(report.original_size)
    );
    println!(
        "Compressed size: {} bytes ({})",
        report.compressed_size,
        format_size(report.compressed_size)
    );
    println!("Compression ratio: {:.2}%", report.ratio);

    Ok(())
}
