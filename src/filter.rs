//! Neighborhood mean filter.

use crate::image::Image;

impl Image {
    /// In-place mean filter with a `(2dx+1) × (2dy+1)` window.
    ///
    /// Each pixel becomes the mean of the original values over
    /// `[x-dx, x+dx] × [y-dy, y+dy]` intersected with the image bounds;
    /// out-of-bounds neighbors are excluded from both sum and count (no
    /// wrap, no reflection). The mean is rounded half away from zero.
    ///
    /// Averaging reads a snapshot taken before any write, so the result
    /// depends only on the original image and `(dx, dy)`, never on
    /// traversal order. `blur(0, 0)` is the identity.
    pub fn blur(&mut self, dx: usize, dy: usize) {
        let (w, h) = (self.width(), self.height());
        let snapshot = self.as_slice().to_vec();
        for y in 0..h {
            let y0 = y.saturating_sub(dy);
            let y1 = y.saturating_add(dy).min(h - 1);
            for x in 0..w {
                let x0 = x.saturating_sub(dx);
                let x1 = x.saturating_add(dx).min(w - 1);
                let mut sum: u64 = 0;
                for sy in y0..=y1 {
                    let row = &snapshot[sy * w + x0..=sy * w + x1];
                    sum += row.iter().map(|&px| u64::from(px)).sum::<u64>();
                }
                let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as u64;
                let i = self.idx(x, y);
                self.data_mut()[i] = (sum as f64 / count as f64).round() as u8;
            }
        }
        self.note_bulk(w * h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_window_is_the_identity() {
        let original = Image::from_raw(3, 3, 255, vec![9, 1, 4, 7, 200, 3, 0, 255, 42]);
        let mut img = original.clone();
        img.blur(0, 0);
        assert_eq!(img, original);
    }

    #[test]
    fn uniform_image_is_a_fixed_point() {
        let mut img = Image::from_raw(4, 4, 255, vec![80; 16]);
        img.blur(2, 1);
        assert!(img.as_slice().iter().all(|&px| px == 80));
    }

    #[test]
    fn edge_pixels_average_only_in_bounds_neighbors() {
        // Single white pixel in a 3x3 black image, 3x3 window.
        let mut img = Image::new(3, 3, 255);
        img.set(0, 0, 90);
        img.blur(1, 1);
        // Corner (0,0): 4 neighbors in bounds -> round(90/4) = 23.
        assert_eq!(img.get(0, 0), 23);
        // Edge (1,0): 6 neighbors -> round(90/6) = 15.
        assert_eq!(img.get(1, 0), 15);
        // Center (1,1): 9 neighbors -> 10.
        assert_eq!(img.get(1, 1), 10);
        // (2,2) never sees the white pixel.
        assert_eq!(img.get(2, 2), 0);
    }

    #[test]
    fn averaging_uses_the_original_values_not_partial_results() {
        // A left-to-right ramp: an in-place sweep without a snapshot would
        // feed already-averaged values into later windows and skew the
        // right side of the row.
        let mut img = Image::from_raw(5, 1, 255, vec![0, 100, 0, 100, 0]);
        img.blur(1, 0);
        // Expected from the original row: [50, 33, 67, 33, 50].
        assert_eq!(img.as_slice(), &[50, 33, 67, 33, 50]);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        let mut img = Image::from_raw(2, 1, 255, vec![1, 2]);
        img.blur(1, 0);
        // Both windows see {1, 2}: mean 1.5 -> 2.
        assert_eq!(img.as_slice(), &[2, 2]);
    }

    #[test]
    fn window_larger_than_image_averages_everything() {
        let mut img = Image::from_raw(2, 2, 255, vec![0, 10, 20, 30]);
        img.blur(10, 10);
        // Every window clamps to the full image: round(60/4) = 15.
        assert!(img.as_slice().iter().all(|&px| px == 15));
    }

    #[test]
    fn blur_of_empty_image_is_a_no_op() {
        let mut img = Image::new(0, 0, 255);
        img.blur(3, 3);
        assert_eq!(img.as_slice().len(), 0);
    }
}
