#![doc = include_str!("../README.md")]

pub mod error;
pub mod image;

// Operation modules: each extends `Image` with one family of operations.
mod codec;
mod compose;
mod filter;
mod geometry;
mod matching;
mod transform;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Error, FormatError};
pub use crate::image::instrument::{AccessCounters, AccessReport, PixelAccessObserver};
pub use crate::image::{Image, PIX_MAX};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use graymap::prelude::*;
///
/// let mut img = Image::new(64, 48, 255);
/// img.set(10, 10, 200);
/// img.blur(1, 1);
/// let (lo, hi) = img.stats();
/// assert_eq!(lo, 0);
/// assert!(hi > 0);
/// ```
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::image::Image;
}
