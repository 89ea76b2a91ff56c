//! GC9A01 (240x240) bring-up over SPI2 via mipidsi, wrapped as the matrix
//! renderer the controller draws into.

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb565, prelude::RgbColor};
use embedded_hal::delay::DelayNs;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use esp_hal::{
    delay::Delay,
    gpio::Output,
    spi::master::{Config as SpiConfig, Spi},
    spi::Mode,
    time::Rate,
    Blocking,
};
use mipidsi::interface::SpiInterface;
use mipidsi::{
    models::GC9A01,
    options::{ColorInversion, ColorOrder, Orientation, Rotation},
    Builder as DisplayBuilder,
};

use crate::panel::PanelMatrix;
use crate::wiring::DisplayPins;

pub const RESOLUTION: u16 = 240;

pub type DisplayType<'a> = mipidsi::Display<
    SpiInterface<'a, ExclusiveDevice<Spi<'a, Blocking>, Output<'a>, NoDelay>, Output<'a>>,
    GC9A01,
    Output<'a>,
>;

pub type MatrixPanel<'a> = PanelMatrix<DisplayType<'a>>;

#[derive(Debug)]
pub enum DisplayError {
    SpiConfig(esp_hal::spi::master::ConfigError),
    Init,
    Clear,
}

pub fn setup_display<'a>(
    display_pins: DisplayPins<'a>,
    display_buf: &'a mut [u8],
) -> Result<DisplayType<'a>, DisplayError> {
    let DisplayPins {
        spi2,
        spi_sck,
        spi_mosi,
        lcd_cs,
        lcd_dc,
        mut lcd_rst,
        mut lcd_bl,
    } = display_pins;

    let mut delay = Delay::new();

    // hardware reset pulse, backlight stays off until the panel is blank
    lcd_rst.set_low();
    delay.delay_ms(10);
    lcd_rst.set_high();

    // SPI @ 40 MHz, Mode 0
    let spi_cfg = SpiConfig::default()
        .with_frequency(Rate::from_hz(40_000_000))
        .with_mode(Mode::_0);
    let spi = Spi::new(spi2, spi_cfg)
        .map_err(DisplayError::SpiConfig)?
        .with_sck(spi_sck)
        .with_mosi(spi_mosi);

    let spi_dev = match ExclusiveDevice::new(spi, lcd_cs, NoDelay) {
        Ok(dev) => dev,
        Err(never) => match never {},
    };
    let di = SpiInterface::new(spi_dev, lcd_dc, display_buf);

    let mut display = DisplayBuilder::new(GC9A01, di)
        .display_size(RESOLUTION, RESOLUTION)
        .display_offset(0, 0)
        .orientation(Orientation::new().rotate(Rotation::Deg180))
        .invert_colors(ColorInversion::Inverted)
        .color_order(ColorOrder::Bgr)
        .reset_pin(lcd_rst)
        .init(&mut delay)
        .map_err(|_| DisplayError::Init)?;

    display
        .clear(Rgb565::BLACK)
        .map_err(|_| DisplayError::Clear)?;
    lcd_bl.set_high();
    // backlight stays driven for the life of the program
    core::mem::forget(lcd_bl);

    Ok(display)
}

/// The round panel as a 5x5 matrix, centred.
pub fn setup_matrix<'a>(
    display_pins: DisplayPins<'a>,
    display_buf: &'a mut [u8],
) -> Result<MatrixPanel<'a>, DisplayError> {
    setup_display(display_pins, display_buf).map(PanelMatrix::centered)
}
