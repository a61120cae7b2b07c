//! Owned 8-bit grayscale raster in row-major layout.
//!
//! `Image` is the data model everything else in the crate operates on: a
//! `width × height` buffer of 8-bit gray levels plus a `maxval` giving the
//! level that means pure white. The pixel at `(x, y)` (x horizontal, y
//! vertical, both 0-indexed) lives at linear offset `y * width + x`, i.e.
//! raster-scan order: left to right within a row, rows top to bottom.
//!
//! Contract style
//! - Coordinate and rectangle preconditions are checked with `assert!` and
//!   panic on violation. They are not recoverable errors; callers validate
//!   with [`Image::valid_position`] / [`Image::valid_rect`] when inputs are
//!   not already known-good.
//! - Recoverable failures exist only at the codec boundary (see
//!   [`crate::error::Error`]).
//! - Ownership is single-owner: every operation that produces a new image
//!   returns an independent `Image`; the buffer is freed exactly once when
//!   the owning value is dropped.

pub mod instrument;

use std::rc::Rc;

use self::instrument::PixelAccessObserver;

/// Largest maxval (and largest storable gray level).
pub const PIX_MAX: u8 = 255;

/// Owned single-channel 8-bit image.
///
/// Stored pixel values are expected to stay `<= maxval`. The primitive
/// [`set`](Image::set) does **not** clamp; only the higher-level transform,
/// compositing and filter operations guarantee saturation.
pub struct Image {
    width: usize,
    height: usize,
    maxval: u8,
    data: Vec<u8>,
    observer: Option<Rc<dyn PixelAccessObserver>>,
}

impl Image {
    /// Create a new black image: every pixel starts at 0.
    ///
    /// Requires `maxval > 0`. Zero-sized images (either dimension 0) are
    /// valid and hold an empty buffer.
    pub fn new(width: usize, height: usize, maxval: u8) -> Self {
        assert!(maxval > 0, "maxval must be positive");
        let len = width
            .checked_mul(height)
            .expect("image dimensions overflow");
        Self {
            width,
            height,
            maxval,
            data: vec![0; len],
            observer: None,
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// Requires `maxval > 0` and `data.len() == width * height`.
    pub fn from_raw(width: usize, height: usize, maxval: u8, data: Vec<u8>) -> Self {
        assert!(maxval > 0, "maxval must be positive");
        let len = width
            .checked_mul(height)
            .expect("image dimensions overflow");
        assert!(
            data.len() == len,
            "buffer length {} does not match {width}x{height}",
            data.len()
        );
        Self {
            width,
            height,
            maxval,
            data,
            observer: None,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The gray level meaning pure white; also the saturation ceiling.
    #[inline]
    pub fn maxval(&self) -> u8 {
        self.maxval
    }

    /// True iff `(x, y)` addresses a pixel inside the image.
    #[inline]
    pub fn valid_position(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// True iff the rectangle `[x, x+w) × [y, y+h)` lies entirely inside
    /// the image. Checked arithmetic, so `x + w` cannot wrap.
    #[inline]
    pub fn valid_rect(&self, x: usize, y: usize, w: usize, h: usize) -> bool {
        x.checked_add(w).is_some_and(|xe| xe <= self.width)
            && y.checked_add(h).is_some_and(|ye| ye <= self.height)
    }

    // Row-major linear index. Valid position is the caller's contract.
    #[inline]
    pub(crate) fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get the gray level at `(x, y)`. Requires a valid position.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        assert!(
            self.valid_position(x, y),
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        if let Some(obs) = &self.observer {
            obs.on_read();
        }
        self.data[self.idx(x, y)]
    }

    /// Set the gray level at `(x, y)`. Requires a valid position.
    ///
    /// Does not clamp `level` against `maxval`; respecting the ceiling is
    /// the caller's responsibility here.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, level: u8) {
        assert!(
            self.valid_position(x, y),
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        if let Some(obs) = &self.observer {
            obs.on_write();
        }
        let i = self.idx(x, y);
        self.data[i] = level;
    }

    /// Borrow row `y` as a slice. Requires `y < height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Mutably borrow row `y`. Requires `y < height`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.width;
        let end = start + self.width;
        &mut self.data[start..end]
    }

    /// The whole buffer in raster-scan order.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    /// Global `(min, max)` gray level over all pixels.
    ///
    /// A zero-sized image reports `(0, 0)`.
    pub fn stats(&self) -> (u8, u8) {
        if self.data.is_empty() {
            return (0, 0);
        }
        let mut min = u8::MAX;
        let mut max = 0;
        for &px in &self.data {
            min = min.min(px);
            max = max.max(px);
        }
        self.note_bulk(self.data.len());
        (min, max)
    }

    /// Attach a pixel-access observer.
    ///
    /// `get`/`set` report single accesses; whole-buffer operations report
    /// through [`PixelAccessObserver::on_bulk`]. Images produced by the
    /// geometry operations start without an observer.
    pub fn set_observer(&mut self, observer: Rc<dyn PixelAccessObserver>) {
        self.observer = Some(observer);
    }

    /// Detach the current observer, if any.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    #[inline]
    pub(crate) fn note_bulk(&self, pixels: usize) {
        if let Some(obs) = &self.observer {
            obs.on_bulk(pixels as u64);
        }
    }
}

impl Clone for Image {
    /// Deep-copies the buffer; the observer (if any) is shared.
    fn clone(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            maxval: self.maxval,
            data: self.data.clone(),
            observer: self.observer.clone(),
        }
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("maxval", &self.maxval)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl PartialEq for Image {
    /// Equality over dimensions, maxval and every pixel; observers are
    /// ignored.
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.maxval == other.maxval
            && self.data == other.data
    }
}

impl Eq for Image {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_image_is_black() {
        let img = Image::new(4, 3, 255);
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 3);
        assert_eq!(img.maxval(), 255);
        assert!(img.as_slice().iter().all(|&px| px == 0));
        assert_eq!(img.stats(), (0, 0));
    }

    #[test]
    fn get_set_round_trip() {
        let mut img = Image::new(3, 2, 100);
        img.set(2, 1, 50);
        assert_eq!(img.get(2, 1), 50);
        assert_eq!(img.stats(), (0, 50));
    }

    #[test]
    fn valid_rect_rejects_overflowing_extents() {
        let img = Image::new(10, 10, 255);
        assert!(img.valid_rect(0, 0, 10, 10));
        assert!(img.valid_rect(3, 4, 7, 6));
        assert!(!img.valid_rect(3, 4, 8, 6));
        assert!(!img.valid_rect(usize::MAX, 0, 2, 1));
        assert!(!img.valid_rect(0, usize::MAX, 1, 2));
    }

    #[test]
    fn zero_sized_images_are_valid() {
        let img = Image::new(0, 5, 255);
        assert_eq!(img.as_slice().len(), 0);
        assert_eq!(img.stats(), (0, 0));
        assert!(!img.valid_position(0, 0));
        assert!(img.valid_rect(0, 0, 0, 0));
    }

    #[test]
    #[should_panic(expected = "maxval must be positive")]
    fn zero_maxval_is_rejected() {
        let _ = Image::new(2, 2, 0);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn get_out_of_bounds_panics() {
        let img = Image::new(3, 3, 255);
        let _ = img.get(3, 0);
    }

    #[test]
    fn from_raw_checks_length() {
        let img = Image::from_raw(2, 2, 255, vec![1, 2, 3, 4]);
        assert_eq!(img.get(1, 1), 4);
        assert_eq!(img.get(0, 1), 3);
    }

    #[test]
    fn equality_ignores_observer() {
        use super::instrument::AccessCounters;

        let mut a = Image::new(2, 2, 255);
        let b = Image::new(2, 2, 255);
        a.set_observer(Rc::new(AccessCounters::default()));
        assert_eq!(a, b);
    }
}
