//! In-place pixel value remaps.
//!
//! These change gray levels but never geometry, allocate nothing and never
//! fail. They assume the image invariant that stored values are `<= maxval`.

use crate::image::Image;

impl Image {
    /// Photographic negative: every pixel becomes `maxval - value`.
    ///
    /// An involution: applying it twice restores the original buffer.
    pub fn negative(&mut self) {
        let maxval = self.maxval();
        for px in self.data_mut() {
            *px = maxval - *px;
        }
        self.note_bulk(self.as_slice().len());
    }

    /// Binarize: values below `thr` become 0 (black), the rest `maxval`
    /// (white).
    pub fn threshold(&mut self, thr: u8) {
        let maxval = self.maxval();
        for px in self.data_mut() {
            *px = if *px < thr { 0 } else { maxval };
        }
        self.note_bulk(self.as_slice().len());
    }

    /// Multiply every pixel by `factor`, saturating at `maxval`.
    ///
    /// Requires `factor >= 0.0`. Saturation is checked before rounding: a
    /// product above `maxval` yields exactly `maxval`, anything else rounds
    /// half away from zero.
    pub fn brighten(&mut self, factor: f64) {
        assert!(factor >= 0.0, "brighten factor must be non-negative");
        let maxval = self.maxval();
        let ceiling = f64::from(maxval);
        for px in self.data_mut() {
            let v = f64::from(*px) * factor;
            *px = if v > ceiling { maxval } else { (v + 0.5) as u8 };
        }
        self.note_bulk(self.as_slice().len());
    }
}
