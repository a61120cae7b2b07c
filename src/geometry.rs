//! Geometric transformations: rotate, mirror, crop.
//!
//! Each operation allocates and returns a new image and leaves the source
//! untouched. The result never inherits the source's access observer.

use crate::image::Image;

impl Image {
    /// Rotate 90° anti-clockwise.
    ///
    /// The result has swapped dimensions; source `(x, y)` lands at
    /// `(y, width - 1 - x)`.
    pub fn rotate_ccw90(&self) -> Image {
        let (w, h) = (self.width(), self.height());
        let mut out = Image::new(h, w, self.maxval());
        for y in 0..h {
            let src_row = self.row(y);
            for x in 0..w {
                let i = out.idx(y, w - 1 - x);
                out.data_mut()[i] = src_row[x];
            }
        }
        self.note_bulk(self.as_slice().len());
        out
    }

    /// Mirror left-right: source `(x, y)` lands at `(width - 1 - x, y)`.
    pub fn mirror_horizontal(&self) -> Image {
        let mut out = Image::new(self.width(), self.height(), self.maxval());
        for y in 0..self.height() {
            let src_row = self.row(y);
            let dst_row = out.row_mut(y);
            for (dst, &src) in dst_row.iter_mut().zip(src_row.iter().rev()) {
                *dst = src;
            }
        }
        self.note_bulk(self.as_slice().len());
        out
    }

    /// Cut out the rectangle with top-left corner `(x, y)`, width `w` and
    /// height `h`.
    ///
    /// Requires the rectangle to lie inside the image; source `(x + j,
    /// y + i)` lands at `(j, i)`.
    pub fn crop(&self, x: usize, y: usize, w: usize, h: usize) -> Image {
        assert!(
            self.valid_rect(x, y, w, h),
            "crop rectangle ({x}, {y}, {w}, {h}) outside {}x{} image",
            self.width(),
            self.height()
        );
        let mut out = Image::new(w, h, self.maxval());
        for i in 0..h {
            let src_row = &self.row(y + i)[x..x + w];
            out.row_mut(i).copy_from_slice(src_row);
        }
        self.note_bulk(w * h);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 3x2 with distinct values at every position.
    fn sample() -> Image {
        Image::from_raw(3, 2, 255, vec![1, 2, 3, 4, 5, 6])
    }

    #[test]
    fn rotate_maps_coordinates_anticlockwise() {
        let img = sample();
        let rot = img.rotate_ccw90();
        assert_eq!((rot.width(), rot.height()), (2, 3));
        // Source (x, y) -> (y, width - 1 - x).
        assert_eq!(rot.get(0, 2), img.get(0, 0));
        assert_eq!(rot.get(1, 2), img.get(0, 1));
        assert_eq!(rot.get(0, 0), img.get(2, 0));
        assert_eq!(rot.get(1, 0), img.get(2, 1));
    }

    #[test]
    fn four_rotations_restore_the_image() {
        let img = sample();
        let back = img
            .rotate_ccw90()
            .rotate_ccw90()
            .rotate_ccw90()
            .rotate_ccw90();
        assert_eq!(back, img);
    }

    #[test]
    fn mirror_twice_restores_the_image() {
        let img = sample();
        let mirrored = img.mirror_horizontal();
        assert_eq!(mirrored.as_slice(), &[3, 2, 1, 6, 5, 4]);
        assert_eq!(mirrored.mirror_horizontal(), img);
    }

    #[test]
    fn crop_advances_both_source_axes() {
        // A diagonal pattern catches a crop that reuses one coordinate for
        // both axes.
        let img = Image::from_raw(
            4,
            4,
            255,
            vec![0, 1, 2, 3, 10, 11, 12, 13, 20, 21, 22, 23, 30, 31, 32, 33],
        );
        let c = img.crop(1, 2, 2, 2);
        assert_eq!((c.width(), c.height()), (2, 2));
        assert_eq!(c.as_slice(), &[21, 22, 31, 32]);
    }

    #[test]
    fn crop_keeps_maxval() {
        let img = Image::new(5, 5, 77);
        let c = img.crop(0, 0, 5, 5);
        assert_eq!(c.maxval(), 77);
        assert_eq!(c, img);
    }

    #[test]
    #[should_panic(expected = "crop rectangle")]
    fn crop_outside_image_panics() {
        let img = sample();
        let _ = img.crop(2, 0, 2, 2);
    }

    #[test]
    fn rotate_zero_width_image() {
        let img = Image::new(0, 3, 255);
        let rot = img.rotate_ccw90();
        assert_eq!((rot.width(), rot.height()), (3, 0));
    }
}
