//! Emulates the LED matrix on a pixel panel: every matrix cell becomes a
//! filled square, brightness maps to the red channel.

use embedded_graphics::{
    draw_target::DrawTarget,
    pixelcolor::Rgb565,
    prelude::{Point, Primitive, RgbColor, Size},
    primitives::{PrimitiveStyle, Rectangle},
    Drawable,
};

use crate::matrix::{DisplayRenderer, MatrixFrame, MATRIX_SIZE};

/// Space between neighbouring cells, in panel pixels.
pub const CELL_GAP: u32 = 4;

pub struct PanelMatrix<D> {
    target: D,
    frame: MatrixFrame,
    origin: Point,
    pitch: u32,
}

impl<D> PanelMatrix<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Cell (0, 0) starts at `origin`, cells are `pitch` pixels apart.
    pub fn new(target: D, origin: Point, pitch: u32) -> Self {
        Self {
            target,
            frame: MatrixFrame::new(),
            origin,
            pitch,
        }
    }

    /// Largest grid that fits the target, centred on it.
    pub fn centered(target: D) -> Self {
        let bounds = target.bounding_box();
        let side = bounds.size.width.min(bounds.size.height);
        let pitch = side / MATRIX_SIZE as u32;
        let used = pitch * MATRIX_SIZE as u32;
        let origin = bounds.top_left
            + Point::new(
                ((bounds.size.width - used) / 2) as i32,
                ((bounds.size.height - used) / 2) as i32,
            );
        Self::new(target, origin, pitch)
    }

    pub fn frame(&self) -> &MatrixFrame {
        &self.frame
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn cell_rect(&self, x: usize, y: usize) -> Rectangle {
        let side = self.pitch.saturating_sub(CELL_GAP).max(1);
        let top_left = self.origin
            + Point::new(
                (x as u32 * self.pitch) as i32,
                (y as u32 * self.pitch) as i32,
            );
        Rectangle::new(top_left, Size::new(side, side))
    }
}

pub fn brightness_color(brightness: u8) -> Rgb565 {
    if brightness == 0 {
        return Rgb565::BLACK;
    }
    let red = (brightness as u16 * Rgb565::MAX_R as u16 / 255) as u8;
    Rgb565::new(red.max(1), 0, 0)
}

impl<D> DisplayRenderer for PanelMatrix<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        match self.frame.clear() {
            Ok(()) => Ok(()),
            Err(never) => match never {},
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, brightness: u8) -> Result<(), Self::Error> {
        match self.frame.set_pixel(x, y, brightness) {
            Ok(()) => Ok(()),
            Err(never) => match never {},
        }
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        for y in 0..MATRIX_SIZE {
            for x in 0..MATRIX_SIZE {
                let color = brightness_color(self.frame.pixel(x, y));
                self.cell_rect(x, y)
                    .into_styled(PrimitiveStyle::with_fill(color))
                    .draw(&mut self.target)?;
            }
        }
        Ok(())
    }
}
