//! Exact subimage comparison and exhaustive search.
//!
//! Read-only: neither image is ever mutated. Matching is exact byte
//! equality of gray levels; maxval plays no role in the comparison.

use log::debug;

use crate::image::Image;

impl Image {
    /// Does `needle` match the subimage of `self` with top-left corner at
    /// `(x, y)`?
    ///
    /// Requires `(x, y)` to be a valid position. A needle extending past
    /// the right or bottom edge cannot match.
    pub fn match_at(&self, x: usize, y: usize, needle: &Image) -> bool {
        assert!(
            self.valid_position(x, y),
            "position ({x}, {y}) outside {}x{} image",
            self.width(),
            self.height()
        );
        self.rect_matches(x, y, needle)
    }

    /// Find the first offset at which `needle` matches inside `self`.
    ///
    /// Candidate offsets are scanned in raster order (rows top to bottom,
    /// left to right within a row) over the full inclusive range
    /// `0..=width - needle.width` × `0..=height - needle.height`, so a
    /// needle flush against the right or bottom edge is still found. A
    /// needle larger than `self` in either dimension yields `None`
    /// immediately.
    pub fn locate(&self, needle: &Image) -> Option<(usize, usize)> {
        let max_x = self.width().checked_sub(needle.width())?;
        let max_y = self.height().checked_sub(needle.height())?;
        for y in 0..=max_y {
            for x in 0..=max_x {
                if self.rect_matches(x, y, needle) {
                    debug!("located {}x{} needle at ({x}, {y})", needle.width(), needle.height());
                    return Some((x, y));
                }
            }
        }
        debug!(
            "no match for {}x{} needle in {}x{} image",
            needle.width(),
            needle.height(),
            self.width(),
            self.height()
        );
        None
    }

    // Row-wise comparison without the position precondition, so `locate`
    // can probe degenerate offsets (e.g. an empty needle at x == width).
    fn rect_matches(&self, x: usize, y: usize, needle: &Image) -> bool {
        if !self.valid_rect(x, y, needle.width(), needle.height()) {
            return false;
        }
        for i in 0..needle.height() {
            if self.row(y + i)[x..x + needle.width()] != *needle.row(i) {
                return false;
            }
        }
        self.note_bulk(needle.as_slice().len());
        true
    }
}
