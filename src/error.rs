//! Recoverable errors for codec and report I/O.
//!
//! Precondition violations (invalid coordinates, out-of-range rectangles,
//! zero maxval) are programming errors and panic via `assert!`; they never
//! surface through these types. Everything here is a resource-level failure
//! the caller is expected to handle: the original `std::io::Error` is kept
//! as the `source` so it still describes the failure after cleanup.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a load/save operation or a JSON report dump.
#[derive(Debug, Error)]
pub enum Error {
    /// Opening or reading the input file failed.
    #[error("failed to read {}: {}", path.display(), source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Creating or writing the output file failed. The on-disk file may be
    /// left partially written.
    #[error("failed to write {}: {}", path.display(), source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was readable but is not a valid raw graymap.
    #[error("{}: {}", path.display(), source)]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    /// Serializing a value to JSON failed.
    #[error("failed to serialize JSON for {}: {}", path.display(), source)]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a byte stream failed to parse as a raw (P5) graymap.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing or invalid magic number (expected \"P5\")")]
    BadMagic,

    /// A header field was absent or did not parse as an ASCII decimal.
    #[error("missing or invalid {field} token")]
    BadToken { field: &'static str },

    #[error("maxval {value} outside the valid range 1..=255")]
    MaxvalRange { value: u64 },

    /// The single whitespace byte between the maxval token and the pixel
    /// data was missing.
    #[error("expected a single whitespace byte after maxval")]
    MissingSeparator,

    #[error("image dimensions {width}x{height} overflow the addressable size")]
    DimensionOverflow { width: usize, height: usize },

    #[error("pixel data truncated: expected {expected} bytes, found {found}")]
    TruncatedPixels { expected: usize, found: usize },
}
