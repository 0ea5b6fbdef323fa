//! Reading tracker files from disk.
//!
//! Files are small, so each one is read whole, decompressed if it carries the
//! gzip magic bytes, and split into lines. The handle is closed before any
//! record is parsed.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{AtcfError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Fail with `FileNotFound` if nothing exists at `path`.
pub fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(AtcfError::FileNotFound(path.to_path_buf()))
    }
}

/// Read a file, transparently decompressing gzip content.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    ensure_exists(path)?;
    let data = std::fs::read(path)?;

    if is_gzip(&data) {
        debug!(path = %path.display(), size = data.len(), "Decompressing gzip track file");
        decompress_gzip(&data)
    } else {
        Ok(data)
    }
}

/// Read a file as text lines.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let data = read_bytes(path)?;
    Ok(String::from_utf8_lossy(&data)
        .lines()
        .map(str::to_string)
        .collect())
}

pub fn is_gzip(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}

/// Decompress gzip-compressed data.
pub fn decompress_gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = flate2::read::GzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| AtcfError::Decompression(e.to_string()))?;
    Ok(decompressed)
}
