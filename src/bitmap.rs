//! Borrowed 1 bit per pixel images for `Display::draw_bitmap`.

/// The byte slice handed to `Bitmap::new` does not match the dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SizeMismatch {
    pub expected: usize,
    pub actual: usize,
}

/// A `width` x `height` monochrome image packed like the framebuffer and display RAM: rows are
/// grouped in banks of 8, each bank has one byte per column, and bit 0 of a byte is the top row of
/// its bank. A bitmap whose height is not a multiple of 8 leaves the high bits of its last bank
/// unused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitmap<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> Bitmap<'a> {
    /// Wrap `data` as an image of `width` x `height` pixels. `data` must hold exactly
    /// `width * ceil(height / 8)` bytes.
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Result<Self, SizeMismatch> {
        let expected = width * ((height + 7) / 8);
        if data.len() != expected {
            return Err(SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Bitmap {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The pixel at column `x`, row `y` of the image. Both must be in range.
    pub(crate) fn pixel(&self, x: usize, y: usize) -> bool {
        self.data[(y / 8) * self.width + x] & (1 << (y % 8)) != 0
    }
}
