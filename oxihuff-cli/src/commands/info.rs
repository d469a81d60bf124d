//! Info command implementation.

use crate::utils::config_for;
use oxihuff::inspect;
use std::fs::File;
use std::path::Path;

pub fn cmd_info(artifact: &Path, legacy: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(artifact)?;
    let size = file.metadata()?.len();
    let info = inspect(file, config_for(legacy))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Artifact Information");
    println!("====================");
    println!("File: {}", artifact.display());
    println!("Size: {} bytes", size);
    println!("Layout: {:?}", info.layout);
    println!("Header size: {} bytes", info.header_size);
    if let Some(bits) = info.bit_count {
        println!("Payload bits: {}", bits);
    }
    println!("Symbols: {}", info.leaf_count);
    println!("Longest code: {} bits", info.depth);

    println!();
    println!("{:>6} {:>6}  Code", "Byte", "Char");
    println!("{}", "-".repeat(40));
    for entry in &info.codes {
        let shown = if entry.symbol.is_ascii_graphic() {
            (entry.symbol as char).to_string()
        } else {
            "-".to_string()
        };
        println!("{:>#6x} {:>6}  {}", entry.symbol, shown, entry.code);
    }

    Ok(())
}
