use graymap::Image;

/// Image where every pixel has a distinct, position-derived level
/// (wrapping at the maxval ceiling). Good for catching coordinate mix-ups.
pub fn gradient(width: usize, height: usize, maxval: u8) -> Image {
    let mut img = Image::new(width, height, maxval);
    for y in 0..height {
        for x in 0..width {
            let level = ((y * width + x) % usize::from(maxval)) as u8;
            img.set(x, y, level);
        }
    }
    img
}

/// Simple high-contrast checkerboard.
pub fn checkerboard(width: usize, height: usize, cell: usize, lo: u8, hi: u8) -> Image {
    assert!(cell > 0, "cell size must be positive");
    let mut img = Image::new(width, height, 255);
    for y in 0..height {
        for x in 0..width {
            let val = if ((x / cell) + (y / cell)) % 2 == 0 { lo } else { hi };
            img.set(x, y, val);
        }
    }
    img
}
