//! Off-screen 1 bit per pixel bitmap.
//!
//! The framebuffer is organized the same way as the PCD8544 display RAM: the image is cut into
//! horizontal banks of 8 pixel rows, and each bank holds one byte per pixel column. Bit 0 of a
//! byte is the topmost row of its bank. Drawing code never needs to know this, because all access
//! goes through the per-pixel accessors.
//!
//! Every coordinate wraps around the framebuffer dimensions (Euclidean remainder), so an
//! out-of-range coordinate silently aliases to an in-bounds pixel instead of failing. The
//! `try_*` accessors are the bounds-checked alternative for callers that would rather find out.

/// A coordinate was outside the framebuffer. Returned by the bounds-checked accessors only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRange {
    pub x: i16,
    pub y: i16,
}

/// A `W` pixel wide bitmap made of `BANKS` banks of 8 rows each, so the height is always
/// `8 * BANKS`.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer<const W: usize, const BANKS: usize> {
    banks: [[u8; W]; BANKS],
}

impl<const W: usize, const BANKS: usize> Framebuffer<W, BANKS> {
    /// Width in pixels.
    pub const WIDTH: usize = W;
    /// Height in pixels.
    pub const HEIGHT: usize = BANKS * 8;
    /// Number of 8-row banks.
    pub const BANK_COUNT: usize = BANKS;

    /// Construct an all-clear framebuffer.
    pub const fn new() -> Self {
        Self {
            banks: [[0; W]; BANKS],
        }
    }

    /// Reduce an arbitrary coordinate to the in-bounds pixel it aliases.
    fn wrap(x: i16, y: i16) -> (usize, usize) {
        (
            (x as i32).rem_euclid(W as i32) as usize,
            (y as i32).rem_euclid(Self::HEIGHT as i32) as usize,
        )
    }

    fn check(x: i16, y: i16) -> Result<(usize, usize), OutOfRange> {
        if x < 0 || y < 0 || x as usize >= W || y as usize >= Self::HEIGHT {
            Err(OutOfRange { x, y })
        } else {
            Ok((x as usize, y as usize))
        }
    }

    fn read(&self, x: usize, y: usize) -> bool {
        self.banks[y / 8][x] & (1 << (y % 8)) != 0
    }

    fn write(&mut self, x: usize, y: usize, state: bool) {
        let mask = 1u8 << (y % 8);
        let cell = &mut self.banks[y / 8][x];
        *cell = (*cell & !mask) | if state { mask } else { 0 };
    }

    /// Read the pixel at `(x, y)`, wrapped into the framebuffer.
    pub fn pixel(&self, x: i16, y: i16) -> bool {
        let (x, y) = Self::wrap(x, y);
        self.read(x, y)
    }

    /// Set or clear the pixel at `(x, y)`, wrapped into the framebuffer. Only the bit for that
    /// pixel changes; its 7 neighbours in the same byte are preserved.
    pub fn set_pixel(&mut self, x: i16, y: i16, state: bool) {
        let (x, y) = Self::wrap(x, y);
        self.write(x, y, state);
    }

    /// Set or clear the pixel at `(x + dx, y + dy)`, wrapped into the framebuffer. The offsets
    /// are reduced before they are added, so the sum cannot overflow.
    pub(crate) fn set_pixel_offset(&mut self, x: i16, dx: usize, y: i16, dy: usize, state: bool) {
        let (x, y) = Self::wrap(x, y);
        self.write((x + dx % W) % W, (y + dy % Self::HEIGHT) % Self::HEIGHT, state);
    }

    /// Like `pixel`, but fails instead of wrapping.
    pub fn try_pixel(&self, x: i16, y: i16) -> Result<bool, OutOfRange> {
        let (x, y) = Self::check(x, y)?;
        Ok(self.read(x, y))
    }

    /// Like `set_pixel`, but fails instead of wrapping. The framebuffer is untouched on error.
    pub fn try_set_pixel(&mut self, x: i16, y: i16, state: bool) -> Result<(), OutOfRange> {
        let (x, y) = Self::check(x, y)?;
        self.write(x, y, state);
        Ok(())
    }

    /// Clear every pixel.
    pub fn clear(&mut self) {
        self.fill(false);
    }

    /// Set every pixel to `state`.
    pub fn fill(&mut self, state: bool) {
        let byte = if state { 0xFF } else { 0x00 };
        for bank in self.banks.iter_mut() {
            for cell in bank.iter_mut() {
                *cell = byte;
            }
        }
    }

    /// Compose the display RAM byte for column `column` of bank `bank` (both wrapped): bit `i`
    /// is the pixel at row `8 * bank + i`.
    pub fn bank_byte(&self, bank: usize, column: usize) -> u8 {
        let x = (column % W) as i16;
        let top = ((bank % BANKS) * 8) as i16;
        (0..8).fold(0u8, |byte, i| {
            byte | ((self.pixel(x, top + i) as u8) << i)
        })
    }

    /// The packed storage, bank by bank.
    pub fn banks(&self) -> &[[u8; W]; BANKS] {
        &self.banks
    }
}

impl<const W: usize, const BANKS: usize> Default for Framebuffer<W, BANKS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const BANKS: usize> core::fmt::Debug for Framebuffer<W, BANKS> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &W)
            .field("height", &Self::HEIGHT)
            .finish()
    }
}
