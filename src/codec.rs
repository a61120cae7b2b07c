//! Raw PGM (P5) load and save.
//!
//! The on-disk grammar is the netpbm raw graymap header followed by one
//! byte per pixel in raster-scan order:
//!
//! ```text
//! "P5" <ws> <width> <ws> <height> <ws> <maxval> <single ws byte> <pixels>
//! ```
//!
//! `#`-comment lines (through the end of line) may appear wherever
//! whitespace is expected in the header. Only 8-bit graymaps are accepted:
//! `maxval` must be in `1..=255`.
//!
//! The whole file is read up front and parsed in memory, so the file handle
//! is released on every path and a failed parse can never leak a half-valid
//! [`Image`]. Saving writes the header without comments; a failed save may
//! leave a partial file on disk.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Error, FormatError};
use crate::image::{Image, PIX_MAX};

impl Image {
    /// Load a raw PGM file.
    pub fn load(path: impl AsRef<Path>) -> Result<Image, Error> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let img = parse_pgm(&bytes).map_err(|source| Error::Format {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "loaded {}: {}x{} maxval={}",
            path.display(),
            img.width(),
            img.height(),
            img.maxval()
        );
        Ok(img)
    }

    /// Save as a raw PGM file: `P5\n<width> <height>\n<maxval>\n` followed
    /// by the raw buffer.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let header = format!("P5\n{} {}\n{}\n", self.width(), self.height(), self.maxval());
        let mut out = Vec::with_capacity(header.len() + self.as_slice().len());
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(self.as_slice());
        fs::write(path, &out).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.note_bulk(self.as_slice().len());
        debug!(
            "saved {}: {}x{} maxval={}",
            path.display(),
            self.width(),
            self.height(),
            self.maxval()
        );
        Ok(())
    }
}

/// Parse a complete raw PGM byte stream into an image.
fn parse_pgm(bytes: &[u8]) -> Result<Image, FormatError> {
    let mut p = Parser { bytes, pos: 0 };

    if p.bump() != Some(b'P') || p.bump() != Some(b'5') {
        return Err(FormatError::BadMagic);
    }

    p.skip_space_and_comments();
    let width = p.ascii_decimal("width")? as usize;
    p.skip_space_and_comments();
    let height = p.ascii_decimal("height")? as usize;
    p.skip_space_and_comments();
    let maxval = p.ascii_decimal("maxval")?;
    if maxval == 0 || maxval > u64::from(PIX_MAX) {
        return Err(FormatError::MaxvalRange { value: maxval });
    }

    // Exactly one whitespace byte separates the maxval token from the
    // pixel data; a comment is not allowed to stand in for it.
    match p.bump() {
        Some(b) if b.is_ascii_whitespace() => {}
        _ => return Err(FormatError::MissingSeparator),
    }

    let expected = width
        .checked_mul(height)
        .ok_or(FormatError::DimensionOverflow { width, height })?;
    let rest = &p.bytes[p.pos..];
    if rest.len() < expected {
        return Err(FormatError::TruncatedPixels {
            expected,
            found: rest.len(),
        });
    }

    let img = Image::from_raw(width, height, maxval as u8, rest[..expected].to_vec());
    Ok(img)
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Skip any mix of whitespace and `#`-comment lines.
    fn skip_space_and_comments(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'#' {
                while let Some(c) = self.bump() {
                    if c == b'\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    /// Parse an unsigned ASCII decimal token of at least one digit.
    fn ascii_decimal(&mut self, field: &'static str) -> Result<u64, FormatError> {
        let start = self.pos;
        let mut value: u64 = 0;
        while let Some(b) = self.peek() {
            if !b.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(b - b'0')))
                .ok_or(FormatError::BadToken { field })?;
            self.pos += 1;
        }
        if self.pos == start {
            return Err(FormatError::BadToken { field });
        }
        Ok(value)
    }
}
