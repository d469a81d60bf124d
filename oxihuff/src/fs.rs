//! File-to-file compression with atomic output.
//!
//! The output is written to a sibling `<name>.partial` file and renamed into
//! place only when the whole operation succeeded. On any failure the partial
//! file is removed, so a failed call never leaves an artifact behind.

use crate::config::HuffmanConfig;
use crate::decoder::{DecompressionReport, HuffmanDecoder};
use crate::encoder::{CompressionReport, HuffmanEncoder};
use oxihuff_core::error::{OxiHuffError, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Compress the file at `input` into a new artifact at `output`.
pub fn compress_file(
    input: &Path,
    output: &Path,
    config: HuffmanConfig,
) -> Result<CompressionReport> {
    let source = File::open(input).map_err(OxiHuffError::unreadable)?;
    let encoder = HuffmanEncoder::new(config);
    write_atomically(output, |sink| encoder.encode(BufReader::new(source), sink))
}

/// Decompress the artifact at `input` into a new file at `output`.
pub fn decompress_file(
    input: &Path,
    output: &Path,
    config: HuffmanConfig,
) -> Result<DecompressionReport> {
    let source = File::open(input).map_err(OxiHuffError::unreadable)?;
    let decoder = HuffmanDecoder::new(config);
    write_atomically(output, |sink| decoder.decode(source, sink))
}

/// Path of the temporary file used while `output` is being produced.
pub fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    output.with_file_name(name)
}

fn write_atomically<T, F>(output: &Path, f: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T>,
{
    let partial = partial_path(output);
    let file = File::create(&partial).map_err(OxiHuffError::unwritable)?;
    let mut sink = BufWriter::new(file);

    let result = f(&mut sink).and_then(|value| {
        sink.flush().map_err(OxiHuffError::unwritable)?;
        Ok(value)
    });
    drop(sink);

    match result {
        Ok(value) => {
            fs::rename(&partial, output).map_err(OxiHuffError::unwritable)?;
            Ok(value)
        }
        Err(err) => {
            debug!(path = %partial.display(), "removing partial output");
            let _ = fs::remove_file(&partial);
            Err(err)
        }
    }
}
