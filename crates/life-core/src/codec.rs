//! Binary save format for a [`Field`].
//!
//! ```text
//! [height: i32 LE][width: i32 LE][height × width cell bytes, row-major]
//! ```
//!
//! One byte per cell: `0` is dead, anything else is alive (the writer always
//! emits `1`). There is no magic number and no version tag; the reader trusts
//! the declared dimensions and rejects anything shorter than they promise.
//! Bytes past the end of the matrix are ignored.
//!
//! Loading never touches the caller's field. [`decode`], [`read_from`] and
//! [`load`] all return a fresh `Field`, so on error the caller still holds
//! its previous generation.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{LifeError, Result};
use crate::field::Field;

/// Size of the `(height, width)` header in bytes.
pub const HEADER_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Serialize a field into a new byte vector.
#[must_use]
pub fn encode(field: &Field) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + field.cells().len());
    out.extend_from_slice(&dimension_bytes(field.height()));
    out.extend_from_slice(&dimension_bytes(field.width()));
    out.extend(field.cells().iter().map(|&alive| u8::from(alive)));
    out
}

/// Write a field to any writer.
///
/// # Errors
///
/// Returns [`LifeError::Io`] if the writer fails.
pub fn write_to(field: &Field, w: &mut impl Write) -> Result<()> {
    w.write_all(&encode(field))?;
    w.flush()?;
    Ok(())
}

/// Write a field to `path`, creating or truncating the file.
///
/// # Errors
///
/// Returns [`LifeError::Io`] if the file cannot be created or written.
pub fn save(field: &Field, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(field, &mut writer)?;
    log::info!(
        "saved {}×{} field to {}",
        field.height(),
        field.width(),
        path.display()
    );
    Ok(())
}

// `Field` never holds a dimension above `i32::MAX`, so this is lossless.
fn dimension_bytes(n: usize) -> [u8; 4] {
    i32::try_from(n).unwrap_or(i32::MAX).to_le_bytes()
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Parse a field from bytes produced by [`encode`].
///
/// # Errors
///
/// Returns [`LifeError::CorruptData`] if the header is truncated, declares a
/// non-positive dimension, or promises more cells than the input holds.
pub fn decode(bytes: &[u8]) -> Result<Field> {
    if bytes.len() < HEADER_LEN {
        return Err(LifeError::CorruptData(format!(
            "header needs {HEADER_LEN} bytes, got {}",
            bytes.len()
        )));
    }

    let height = read_dimension(&bytes[0..4], "height")?;
    let width = read_dimension(&bytes[4..8], "width")?;
    let count = height.checked_mul(width).ok_or_else(|| {
        LifeError::CorruptData(format!("declared size {height}×{width} overflows"))
    })?;

    let body = &bytes[HEADER_LEN..];
    if body.len() < count {
        return Err(LifeError::CorruptData(format!(
            "declared {height}×{width} needs {count} cell bytes, got {}",
            body.len()
        )));
    }
    if body.len() > count {
        log::debug!("ignoring {} trailing bytes after cell matrix", body.len() - count);
    }

    let cells = body[..count].iter().map(|&b| b != 0).collect();
    Field::from_cells(height, width, cells)
}

/// Read a field from any reader.
///
/// The header is read first so the body read is bounded by the declared
/// size; a reader that ends early is [`LifeError::CorruptData`], a reader
/// that fails is [`LifeError::Io`].
///
/// # Errors
///
/// See above.
pub fn read_from(r: &mut impl Read) -> Result<Field> {
    let mut header = [0u8; HEADER_LEN];
    read_exact_or_corrupt(r, &mut header, "header")?;

    let height = read_dimension(&header[0..4], "height")?;
    let width = read_dimension(&header[4..8], "width")?;
    let count = height.checked_mul(width).ok_or_else(|| {
        LifeError::CorruptData(format!("declared size {height}×{width} overflows"))
    })?;

    // Grow with the data actually present rather than trusting `count` for
    // the allocation up front.
    let limit = u64::try_from(count).map_err(|_| {
        LifeError::CorruptData(format!("declared size {height}×{width} is too large to read"))
    })?;
    let mut body = Vec::new();
    let read = r.by_ref().take(limit).read_to_end(&mut body)?;
    if read < count {
        return Err(LifeError::CorruptData(format!(
            "declared {height}×{width} needs {count} cell bytes, got {read}"
        )));
    }

    let cells = body.into_iter().map(|b| b != 0).collect();
    Field::from_cells(height, width, cells)
}

/// Load a field from `path`.
///
/// # Errors
///
/// Returns [`LifeError::Io`] if the file cannot be opened or read, and
/// [`LifeError::CorruptData`] if its contents are truncated or malformed.
pub fn load(path: &Path) -> Result<Field> {
    let file = File::open(path)?;
    let field = read_from(&mut BufReader::new(file))?;
    log::info!(
        "loaded {}×{} field from {}",
        field.height(),
        field.width(),
        path.display()
    );
    Ok(field)
}

fn read_dimension(bytes: &[u8], name: &str) -> Result<usize> {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(bytes);
    let value = i32::from_le_bytes(raw);
    usize::try_from(value)
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| LifeError::CorruptData(format!("{name} must be positive, got {value}")))
}

fn read_exact_or_corrupt(r: &mut impl Read, buf: &mut [u8], what: &str) -> Result<()> {
    r.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            LifeError::CorruptData(format!("{what} truncated"))
        } else {
            LifeError::Io(e)
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
