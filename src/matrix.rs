//! The LED matrix side: what the trackers ask to draw, and how that lands on
//! a grid of pixels.
//!
//! The trackers never touch pixels. They emit a [`RenderCommand`], and a
//! [`MatrixPainter`] turns that into `set_pixel` calls on whatever
//! [`DisplayRenderer`] the caller lends it.

use core::convert::Infallible;

use crate::circular::{advance, Direction, Position};
use crate::error::ConfigError;
use crate::sensor::Tilt;

/// `(x, y)` on the matrix, (0,0) is top-left.
pub type GridPoint = (u8, u8);

pub const MATRIX_SIZE: usize = 5;
pub const CENTER: GridPoint = (2, 2);
pub const MAX_RING_CELLS: usize = 32;

pub const ARC_BRIGHTNESS: u8 = 96;
pub const ENDPOINT_BRIGHTNESS: u8 = 255;
pub const DIGIT_BRIGHTNESS: u8 = 40;
pub const DOT_BRIGHTNESS: u8 = 255;

/// Perimeter of the 5x5 grid, clockwise, starting next to the top-left corner.
///
/// Cell `i` is where a ray from the centre at `i * 20 - 20` degrees (clockwise
/// from up) leaves the grid. 18 directions over 16 border cells, so the middle
/// cells of the left and right edges are listed twice.
pub const RING_5X5: [GridPoint; 18] = [
    (1, 0),
    (2, 0),
    (3, 0),
    (4, 0),
    (4, 1),
    (4, 2),
    (4, 2),
    (4, 3),
    (4, 4),
    (3, 4),
    (2, 4),
    (1, 4),
    (0, 4),
    (0, 3),
    (0, 2),
    (0, 2),
    (0, 1),
    (0, 0),
];

/// 5x5 digits, one byte per row, bit 4 is the leftmost column.
const DIGITS: [[u8; 5]; 10] = [
    [0b01100, 0b10010, 0b10010, 0b10010, 0b01100],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b01110],
    [0b11100, 0b00010, 0b01100, 0b10000, 0b11110],
    [0b11110, 0b00010, 0b00100, 0b10010, 0b01100],
    [0b00110, 0b01010, 0b10010, 0b11111, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b11110],
    [0b00010, 0b00100, 0b01110, 0b10001, 0b01110],
    [0b11111, 0b00010, 0b00100, 0b01000, 0b10000],
    [0b01110, 0b10001, 0b01110, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b01110, 0b00100, 0b01000],
];

/// Narrow pixel sink the core draws through.
pub trait DisplayRenderer {
    type Error;

    fn clear(&mut self) -> Result<(), Self::Error>;
    fn set_pixel(&mut self, x: i32, y: i32, brightness: u8) -> Result<(), Self::Error>;
    /// Push everything drawn since the last `clear` to the hardware.
    fn present(&mut self) -> Result<(), Self::Error>;
}

impl<R: DisplayRenderer + ?Sized> DisplayRenderer for &mut R {
    type Error = R::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        (**self).clear()
    }

    fn set_pixel(&mut self, x: i32, y: i32, brightness: u8) -> Result<(), Self::Error> {
        (**self).set_pixel(x, y, brightness)
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        (**self).present()
    }
}

/// What a tracker wants on screen this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RenderCommand {
    #[default]
    Blank,
    /// Ring cells from `pivot` to `current`, walking in `direction`. Without a
    /// rotational direction only the two endpoints are lit.
    Arc {
        pivot: Position,
        current: Position,
        direction: Direction,
    },
    /// The arc came all the way round: a dot in the centre instead.
    Closed,
    /// Turn count as a dim digit, tilt as a bright dot on top.
    Counter { turns: u8, tilt: Tilt },
}

/// Brightness grid kept in memory. Useful on its own for tests, and as the
/// back buffer of panel renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatrixFrame<const W: usize = MATRIX_SIZE, const H: usize = MATRIX_SIZE> {
    cells: [[u8; W]; H],
    presented: u32,
}

impl<const W: usize, const H: usize> Default for MatrixFrame<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> MatrixFrame<W, H> {
    pub const fn new() -> Self {
        Self {
            cells: [[0; W]; H],
            presented: 0,
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0)
    }

    pub fn rows(&self) -> &[[u8; W]; H] {
        &self.cells
    }

    /// Number of cells with non-zero brightness.
    pub fn lit(&self) -> usize {
        self.cells.iter().flatten().filter(|b| **b > 0).count()
    }

    /// How many times `present` was called.
    pub fn presented(&self) -> u32 {
        self.presented
    }
}

impl<const W: usize, const H: usize> DisplayRenderer for MatrixFrame<W, H> {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.cells = [[0; W]; H];
        Ok(())
    }

    fn set_pixel(&mut self, x: i32, y: i32, brightness: u8) -> Result<(), Self::Error> {
        if x < 0 || y < 0 {
            return Ok(());
        }
        if let Some(cell) = self
            .cells
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *cell = brightness;
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.presented = self.presented.wrapping_add(1);
        Ok(())
    }
}

/// Turns [`RenderCommand`]s into pixels using a ring layout.
#[derive(Clone, Debug)]
pub struct MatrixPainter {
    ring: heapless::Vec<GridPoint, MAX_RING_CELLS>,
}

impl MatrixPainter {
    pub fn new(ring: &[GridPoint]) -> Result<Self, ConfigError> {
        if ring.is_empty() {
            return Err(ConfigError::ZeroRadix);
        }
        let mut cells = heapless::Vec::new();
        cells
            .extend_from_slice(ring)
            .map_err(|_| ConfigError::RingTooLarge)?;
        Ok(Self { ring: cells })
    }

    pub fn radix(&self) -> u16 {
        self.ring.len() as u16
    }

    pub fn ring_cell(&self, position: Position) -> Option<GridPoint> {
        self.ring.get(position as usize).copied()
    }

    /// Draw `command` onto `out`. Does not clear or present.
    pub fn draw<D: DisplayRenderer>(
        &self,
        command: &RenderCommand,
        out: &mut D,
    ) -> Result<(), D::Error> {
        match *command {
            RenderCommand::Blank => Ok(()),
            RenderCommand::Closed => put(out, CENTER, DOT_BRIGHTNESS),
            RenderCommand::Arc {
                pivot,
                current,
                direction,
            } => self.draw_arc(pivot, current, direction, out),
            RenderCommand::Counter { turns, tilt } => {
                draw_digit(turns, out)?;
                let x = CENTER.0 as i32 + tilt.x as i32;
                let y = CENTER.1 as i32 + tilt.y as i32;
                out.set_pixel(x, y, DOT_BRIGHTNESS)
            }
        }
    }

    fn draw_arc<D: DisplayRenderer>(
        &self,
        pivot: Position,
        current: Position,
        direction: Direction,
        out: &mut D,
    ) -> Result<(), D::Error> {
        let radix = self.radix();
        if direction.is_rotation() {
            let mut p = pivot;
            for _ in 0..radix {
                if let Some(cell) = self.ring_cell(p) {
                    put(out, cell, ARC_BRIGHTNESS)?;
                }
                if p == current {
                    break;
                }
                p = advance(p, direction, radix);
            }
        }
        for end in [pivot, current] {
            if let Some(cell) = self.ring_cell(end) {
                put(out, cell, ENDPOINT_BRIGHTNESS)?;
            }
        }
        Ok(())
    }
}

fn put<D: DisplayRenderer>(out: &mut D, (x, y): GridPoint, brightness: u8) -> Result<(), D::Error> {
    out.set_pixel(x as i32, y as i32, brightness)
}

fn draw_digit<D: DisplayRenderer>(digit: u8, out: &mut D) -> Result<(), D::Error> {
    let glyph = &DIGITS[digit.min(9) as usize];
    for (y, row) in glyph.iter().enumerate() {
        for x in 0..MATRIX_SIZE {
            if row & (0b10000 >> x) != 0 {
                out.set_pixel(x as i32, y as i32, DIGIT_BRIGHTNESS)?;
            }
        }
    }
    Ok(())
}
