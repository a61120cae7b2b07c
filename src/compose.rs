//! Compositing: paste and alpha-blend a source image into a destination.
//!
//! Both operations mutate the destination in place and never touch the
//! source. The source must fit entirely inside the destination at the
//! given offset.

use crate::image::Image;

impl Image {
    /// Overwrite the rectangle at `(x, y)` with the pixels of `src`.
    ///
    /// Requires `src` placed at `(x, y)` to lie inside `self`. No blending
    /// and no clamping: values are copied as-is, even if `src.maxval`
    /// differs.
    pub fn paste(&mut self, x: usize, y: usize, src: &Image) {
        assert!(
            self.valid_rect(x, y, src.width(), src.height()),
            "paste of {}x{} at ({x}, {y}) outside {}x{} image",
            src.width(),
            src.height(),
            self.width(),
            self.height()
        );
        for i in 0..src.height() {
            let dst_row = &mut self.row_mut(y + i)[x..x + src.width()];
            dst_row.copy_from_slice(src.row(i));
        }
        self.note_bulk(src.as_slice().len());
    }

    /// Blend `src` over the rectangle at `(x, y)` with weight `alpha`.
    ///
    /// Every covered pixel becomes `alpha * src + (1 - alpha) * dst`,
    /// rounded half away from zero and clamped to `[0, maxval]`. `alpha`
    /// outside `[0, 1]` is allowed for extrapolation effects; the clamp
    /// still applies.
    pub fn blend(&mut self, x: usize, y: usize, src: &Image, alpha: f64) {
        assert!(
            self.valid_rect(x, y, src.width(), src.height()),
            "blend of {}x{} at ({x}, {y}) outside {}x{} image",
            src.width(),
            src.height(),
            self.width(),
            self.height()
        );
        let ceiling = f64::from(self.maxval());
        for i in 0..src.height() {
            let src_row = src.row(i);
            let dst_row = &mut self.row_mut(y + i)[x..x + src.width()];
            for (dst, &s) in dst_row.iter_mut().zip(src_row) {
                let v = alpha * f64::from(s) + (1.0 - alpha) * f64::from(*dst);
                *dst = v.round().clamp(0.0, ceiling) as u8;
            }
        }
        self.note_bulk(src.as_slice().len());
    }
}
