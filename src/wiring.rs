//! Board pin mapping for the ESP32-S3 devkit with the 1.28" GC9A01 round
//! panel and an I2C sensor breakout (QMI8658 + QMC5883L).
//!
//! The following wiring is assumed:
//! - LCD SCK  => GPIO10, MOSI => GPIO11
//! - LCD CS   => GPIO9,  DC   => GPIO8
//! - LCD RST  => GPIO14, BL   => GPIO2
//! - I2C SDA  => GPIO6,  SCL  => GPIO7 (both sensors on one bus, external pull-ups)
//! - GND => GND, 3.3V => 3.3V

use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::peripherals::{Peripherals, GPIO10, GPIO11, GPIO6, GPIO7, I2C0, SPI2};

pub struct DisplayPins<'a> {
    pub spi2: SPI2<'a>,
    pub spi_sck: GPIO10<'a>,
    pub spi_mosi: GPIO11<'a>,
    pub lcd_cs: Output<'a>,
    pub lcd_dc: Output<'a>,
    pub lcd_rst: Output<'a>,
    pub lcd_bl: Output<'a>,
}

pub struct SensorPins<'a> {
    pub i2c0: I2C0<'a>,
    pub sda: GPIO6<'a>,
    pub scl: GPIO7<'a>,
}

pub struct BoardPins<'a> {
    pub display_pins: DisplayPins<'a>,
    pub sensor_pins: SensorPins<'a>,
}

pub fn init_board_pins<'a>(p: Peripherals) -> BoardPins<'a> {
    // LCD control pins, SCK/MOSI are handed to the SPI driver untouched
    let lcd_cs = Output::new(p.GPIO9, Level::High, OutputConfig::default());
    let lcd_dc = Output::new(p.GPIO8, Level::Low, OutputConfig::default());
    let lcd_rst = Output::new(p.GPIO14, Level::High, OutputConfig::default());
    let lcd_bl = Output::new(p.GPIO2, Level::Low, OutputConfig::default());

    BoardPins {
        display_pins: DisplayPins {
            spi2: p.SPI2,
            spi_sck: p.GPIO10,
            spi_mosi: p.GPIO11,
            lcd_cs,
            lcd_dc,
            lcd_rst,
            lcd_bl,
        },
        sensor_pins: SensorPins {
            i2c0: p.I2C0,
            sda: p.GPIO6,
            scl: p.GPIO7,
        },
    }
}
