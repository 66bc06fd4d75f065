//! Drawing primitives. These only touch the framebuffer; call `Display::flush` to show the
//! result. Every coordinate wraps around the display edges the same way `Framebuffer::set_pixel`
//! does, so a shape that runs off one edge continues on the opposite one.

use itertools::iproduct;

use super::Display;
use crate::bitmap::Bitmap;
use crate::command::consts::*;
use crate::interface;

/// Inclusive range between two coordinates given in either order.
fn span(a: i16, b: i16) -> core::ops::RangeInclusive<i16> {
    a.min(b)..=a.max(b)
}

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Read the pixel at `(x, y)` from the framebuffer.
    pub fn pixel(&self, x: i16, y: i16) -> bool {
        self.framebuffer.pixel(x, y)
    }

    /// Set or clear the pixel at `(x, y)` in the framebuffer.
    pub fn set_pixel(&mut self, x: i16, y: i16, state: bool) {
        self.framebuffer.set_pixel(x, y, state)
    }

    /// Clear the framebuffer. Unlike `clear_screen`, display RAM is left alone until the next
    /// flush.
    pub fn clear(&mut self) {
        self.framebuffer.clear()
    }

    /// Clear pixel row `y`.
    pub fn clear_line(&mut self, y: i16) {
        for x in 0..NUM_PIXEL_COLS as i16 {
            self.framebuffer.set_pixel(x, y, false);
        }
    }

    /// Clear pixel column `x`.
    pub fn clear_column(&mut self, x: i16) {
        for y in 0..NUM_PIXEL_ROWS as i16 {
            self.framebuffer.set_pixel(x, y, false);
        }
    }

    /// Set every pixel of column `x` between rows `y0` and `y1`, inclusive.
    pub fn draw_vertical_line(&mut self, x: i16, y0: i16, y1: i16) {
        for y in span(y0, y1) {
            self.framebuffer.set_pixel(x, y, true);
        }
    }

    /// Set every pixel of row `y` between columns `x0` and `x1`, inclusive.
    pub fn draw_horizontal_line(&mut self, y: i16, x0: i16, x1: i16) {
        for x in span(x0, x1) {
            self.framebuffer.set_pixel(x, y, true);
        }
    }

    /// Outline the rectangle with corners `(x0, y0)` and `(x1, y1)`. The interior is left alone.
    pub fn draw_rectangle(&mut self, x0: i16, y0: i16, x1: i16, y1: i16) {
        self.draw_vertical_line(x0, y0, y1);
        self.draw_vertical_line(x1, y0, y1);
        self.draw_horizontal_line(y0, x0, x1);
        self.draw_horizontal_line(y1, x0, x1);
    }

    /// Set every pixel of the rectangle with corners `(x0, y0)` and `(x1, y1)`, edges included.
    pub fn draw_filled_rectangle(&mut self, x0: i16, y0: i16, x1: i16, y1: i16) {
        for (y, x) in iproduct!(span(y0, y1), span(x0, x1)) {
            self.framebuffer.set_pixel(x, y, true);
        }
    }

    /// Copy `bitmap` into the framebuffer with its top left corner at `(x, y)`. Cleared bitmap
    /// pixels clear the framebuffer too.
    pub fn draw_bitmap(&mut self, x: i16, y: i16, bitmap: &Bitmap) {
        for (row, col) in iproduct!(0..bitmap.height(), 0..bitmap.width()) {
            self.framebuffer
                .set_pixel_offset(x, col, y, row, bitmap.pixel(col, row));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bitmap::Bitmap;
    use crate::display::Display;
    use crate::interface::test_spy::TestSpyInterface;

    fn display() -> (TestSpyInterface, Display<TestSpyInterface>) {
        let di = TestSpyInterface::new();
        let disp = Display::new(di.split());
        (di, disp)
    }

    /// Every lit pixel, row by row.
    fn lit(disp: &Display<TestSpyInterface>) -> Vec<(i16, i16)> {
        let mut out = Vec::new();
        for y in 0..48 {
            for x in 0..84 {
                if disp.pixel(x, y) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn drawing_sends_nothing() {
        let (di, mut disp) = display();
        disp.draw_rectangle(0, 0, 83, 47);
        disp.draw_filled_rectangle(3, 3, 9, 9);
        disp.clear_line(5);
        di.check_multi(&[]);
    }

    #[test]
    fn horizontal_line() {
        let (_di, mut disp) = display();
        disp.draw_horizontal_line(7, 2, 5);
        assert_eq!(lit(&disp), vec![(2, 7), (3, 7), (4, 7), (5, 7)]);

        let (_di, mut disp) = display();
        disp.draw_horizontal_line(7, 5, 2);
        assert_eq!(lit(&disp), vec![(2, 7), (3, 7), (4, 7), (5, 7)]);
    }

    #[test]
    fn vertical_line() {
        let (_di, mut disp) = display();
        disp.draw_vertical_line(10, 9, 6);
        assert_eq!(lit(&disp), vec![(10, 6), (10, 7), (10, 8), (10, 9)]);
    }

    #[test]
    fn single_pixel_lines() {
        let (_di, mut disp) = display();
        disp.draw_horizontal_line(0, 4, 4);
        disp.draw_vertical_line(20, 30, 30);
        assert_eq!(lit(&disp), vec![(4, 0), (20, 30)]);
    }

    #[test]
    fn lines_wrap() {
        let (_di, mut disp) = display();
        disp.draw_horizontal_line(1, 82, 85);
        assert_eq!(lit(&disp), vec![(0, 1), (1, 1), (82, 1), (83, 1)]);
    }

    #[test]
    fn rectangle_outline() {
        let (_di, mut disp) = display();
        disp.draw_rectangle(0, 0, 10, 10);
        let lit = lit(&disp);
        assert_eq!(lit.len(), 40);
        for (x, y) in lit {
            assert!(x == 0 || x == 10 || y == 0 || y == 10);
            assert!(x <= 10 && y <= 10);
        }
        for x in 1..10 {
            for y in 1..10 {
                assert!(!disp.pixel(x, y));
            }
        }
    }

    #[test]
    fn rectangle_keeps_interior() {
        let (_di, mut disp) = display();
        disp.set_pixel(5, 5, true);
        disp.draw_rectangle(10, 10, 0, 0);
        assert!(disp.pixel(5, 5));
        assert_eq!(lit(&disp).len(), 41);
    }

    #[test]
    fn filled_rectangle() {
        let (_di, mut disp) = display();
        disp.draw_filled_rectangle(6, 4, 2, 1);
        let lit = lit(&disp);
        assert_eq!(lit.len(), 5 * 4);
        assert!(lit
            .iter()
            .all(|&(x, y)| (2..=6).contains(&x) && (1..=4).contains(&y)));
    }

    #[test]
    fn clear_line_and_column() {
        let (_di, mut disp) = display();
        disp.draw_filled_rectangle(0, 0, 83, 47);
        disp.clear_line(3);
        disp.clear_column(-1);
        assert!(!disp.pixel(0, 3));
        assert!(!disp.pixel(83, 3));
        assert!(!disp.pixel(83, 0));
        assert!(!disp.pixel(83, 47));
        assert!(disp.pixel(82, 2));
        assert!(disp.pixel(0, 4));
        assert_eq!(lit(&disp).len(), 84 * 48 - 84 - 47);
    }

    #[test]
    fn bitmap_copy() {
        let (_di, mut disp) = display();
        disp.draw_filled_rectangle(0, 0, 83, 47);
        // 3 columns, 2 rows: a single lit pixel in the middle of the bottom row.
        let bmp = Bitmap::new(&[0b00, 0b10, 0b00], 3, 2).unwrap();
        disp.draw_bitmap(40, 20, &bmp);
        assert!(disp.pixel(41, 21));
        for &(x, y) in &[(40, 20), (41, 20), (42, 20), (40, 21), (42, 21)] {
            assert!(!disp.pixel(x, y));
        }
        assert!(disp.pixel(39, 20));
        assert!(disp.pixel(43, 21));
        assert!(disp.pixel(41, 22));
    }

    #[test]
    fn bitmap_wraps() {
        let (_di, mut disp) = display();
        let bmp = Bitmap::new(&[0xFF, 0xFF], 2, 8).unwrap();
        disp.draw_bitmap(83, 44, &bmp);
        assert_eq!(lit(&disp).len(), 16);
        assert!(disp.pixel(83, 44));
        assert!(disp.pixel(0, 47));
        assert!(disp.pixel(0, 0));
        assert!(disp.pixel(83, 3));
    }

    #[test]
    fn bitmap_wraps_at_coordinate_limits() {
        let (_di, mut disp) = display();
        let bmp = Bitmap::new(&[0x01, 0x01], 2, 1).unwrap();
        disp.draw_bitmap(i16::MAX, 0, &bmp);
        // 32767 % 84 == 7, and the next column is 8 rather than an aliased negative one.
        assert_eq!(lit(&disp), vec![(7, 0), (8, 0)]);

        let (_di, mut disp) = display();
        let bmp = Bitmap::new(&[0xFF], 1, 8).unwrap();
        disp.draw_bitmap(0, i16::MAX - 3, &bmp);
        // 32764 % 48 == 28.
        assert_eq!(
            lit(&disp),
            (28..36).map(|y| (0, y)).collect::<Vec<_>>()
        );
    }
}
