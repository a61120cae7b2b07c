//! Pixel-access instrumentation.
//!
//! Batch tools sometimes want to know how much pixel traffic an operation
//! generates. Rather than a process-wide counter array, instrumentation is
//! an observer attached to an individual [`Image`](super::Image): the core
//! calls it, it does not implement any policy. [`AccessCounters`] is the
//! ready-made counting implementation; its [`AccessReport`] snapshot can be
//! dumped as JSON via [`write_json_file`].

use std::cell::Cell;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Error;

/// Observer of pixel traffic on a single image.
///
/// `on_read`/`on_write` fire for the primitive per-pixel accessors;
/// whole-buffer operations (transforms, geometry, codec fills, filters)
/// report once through `on_bulk` with the number of pixels touched.
/// Default methods do nothing, so implementations opt into the events they
/// care about.
pub trait PixelAccessObserver {
    fn on_read(&self) {}
    fn on_write(&self) {}
    fn on_bulk(&self, _pixels: u64) {}
}

/// Counting observer. Single-threaded by design, hence `Cell`.
#[derive(Debug, Default)]
pub struct AccessCounters {
    reads: Cell<u64>,
    writes: Cell<u64>,
    bulk_pixels: Cell<u64>,
}

impl AccessCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero all counters.
    pub fn reset(&self) {
        self.reads.set(0);
        self.writes.set(0);
        self.bulk_pixels.set(0);
    }

    /// Snapshot the current totals.
    pub fn report(&self) -> AccessReport {
        AccessReport {
            reads: self.reads.get(),
            writes: self.writes.get(),
            bulk_pixels: self.bulk_pixels.get(),
        }
    }
}

impl PixelAccessObserver for AccessCounters {
    fn on_read(&self) {
        self.reads.set(self.reads.get() + 1);
    }

    fn on_write(&self) {
        self.writes.set(self.writes.get() + 1);
    }

    fn on_bulk(&self, pixels: u64) {
        self.bulk_pixels.set(self.bulk_pixels.get() + pixels);
    }
}

/// Totals observed by an [`AccessCounters`] at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessReport {
    /// Single-pixel reads through `get`.
    pub reads: u64,
    /// Single-pixel writes through `set`.
    pub writes: u64,
    /// Pixels touched by whole-buffer operations.
    pub bulk_pixels: u64,
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    let json = serde_json::to_string_pretty(value).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
