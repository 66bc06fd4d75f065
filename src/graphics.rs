//! `embedded-graphics` support, enabled with the `graphics` feature.
//!
//! The draw targets discard pixels outside the display instead of wrapping them, as
//! `embedded-graphics` expects; the wrapping behavior stays with the native drawing methods.

use core::convert::{Infallible, TryFrom};

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::BinaryColor;
use embedded_graphics_core::Pixel;

use crate::display::Display;
use crate::framebuffer::Framebuffer;
use crate::interface;

impl<const W: usize, const BANKS: usize> OriginDimensions for Framebuffer<W, BANKS> {
    fn size(&self) -> Size {
        Size::new(W as u32, (BANKS * 8) as u32)
    }
}

impl<const W: usize, const BANKS: usize> DrawTarget for Framebuffer<W, BANKS> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (i16::try_from(point.x), i16::try_from(point.y)) {
                // Out of range pixels are dropped rather than wrapped.
                let _ = self.try_set_pixel(x, y, color.is_on());
            }
        }
        Ok(())
    }
}

impl<DI> OriginDimensions for Display<DI>
where
    DI: interface::DisplayInterface,
{
    fn size(&self) -> Size {
        self.framebuffer().size()
    }
}

impl<DI> DrawTarget for Display<DI>
where
    DI: interface::DisplayInterface,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer_mut().draw_iter(pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics_core::geometry::Point;

    use crate::interface::test_spy::TestSpyInterface;

    #[test]
    fn size() {
        let disp = Display::new(TestSpyInterface::new());
        assert_eq!(disp.size(), Size::new(84, 48));
    }

    #[test]
    fn draws_and_clips() {
        let mut disp = Display::new(TestSpyInterface::new());
        disp.draw_iter(
            [
                Pixel(Point::new(3, 4), BinaryColor::On),
                Pixel(Point::new(-1, 4), BinaryColor::On),
                Pixel(Point::new(84, 0), BinaryColor::On),
                Pixel(Point::new(0, 48), BinaryColor::On),
                Pixel(Point::new(70_000, 1), BinaryColor::On),
            ]
            .iter()
            .cloned(),
        )
        .unwrap();
        assert!(disp.pixel(3, 4));
        assert!(!disp.pixel(83, 4));
        let lit: u32 = disp
            .framebuffer()
            .banks()
            .iter()
            .flat_map(|bank| bank.iter())
            .map(|b| b.count_ones())
            .sum();
        assert_eq!(lit, 1);

        disp.draw_iter(core::iter::once(Pixel(Point::new(3, 4), BinaryColor::Off)))
            .unwrap();
        assert!(!disp.pixel(3, 4));
    }
}
