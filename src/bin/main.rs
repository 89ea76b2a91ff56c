//! Twist Matrix firmware
//! ========================================
//! needs the Xtensa toolchain
//! source ~/export-esp.sh
//! cargo run --release --features firmware
//! ========================================
//!
//! Stand the board on an edge and twist it: an arc grows around the matrix
//! border from where the twist started. Lay it flat and spin it: the digit
//! counts full turns, tilting hard clears it.

//% CHIPS: esp32s3
//% FEATURES: esp-hal/unstable

#![no_std]
#![no_main]

// Define the application description, which is placed in a special section of the binary.
// This is used by the bootloader to verify the application.
esp_bootloader_esp_idf::esp_app_desc!();

use core::cell::RefCell;
use core::fmt::Display;

use esp_backtrace as _;
use esp_hal::{
    delay::Delay,
    i2c::master::{Config as I2cConfig, I2c},
    main, ram,
    time::Rate,
    Config,
};

use embedded_hal::delay::DelayNs;
use embedded_hal_bus::i2c::RefCellDevice;
use log::{error, info, warn, LevelFilter};

use twist_matrix::{
    board::{AxisMap, Board},
    display::setup_matrix,
    qmc5883l::{self, Qmc5883l},
    qmi8658_imu::{self, Qmi8658},
    wiring::{init_board_pins, BoardPins},
    Config as TrackerSettings, Controller,
};

// SPI staging buffer for mipidsi
#[ram]
static mut DISPLAY_BUF: [u8; 1024] = [0; 1024];

const RETRY_MS: u32 = 200;

fn fatal(what: &str, err: impl Display) -> ! {
    error!("{}: {}", what, err);
    esp_println::println!("boot halted: {}", what);
    let mut delay = Delay::new();
    loop {
        delay.delay_ms(1_000);
    }
}

#[main]
fn main() -> ! {
    esp_println::logger::init_logger(LevelFilter::Info);

    let peripherals = esp_hal::init(Config::default());
    let BoardPins {
        display_pins,
        sensor_pins,
    } = init_board_pins(peripherals);

    // Safe because DISPLAY_BUF is only used here
    let display_buf = unsafe { &mut *core::ptr::addr_of_mut!(DISPLAY_BUF) };
    let mut panel = match setup_matrix(display_pins, display_buf) {
        Ok(panel) => panel,
        Err(e) => fatal("display init", format_args!("{:?}", e)),
    };

    // -------------------- sensors on the shared I2C bus --------------------
    let i2c_cfg = I2cConfig::default().with_frequency(Rate::from_khz(400));
    let i2c = match I2c::new(sensor_pins.i2c0, i2c_cfg) {
        Ok(i2c) => i2c.with_sda(sensor_pins.sda).with_scl(sensor_pins.scl),
        Err(e) => fatal("i2c init", format_args!("{:?}", e)),
    };
    let bus = RefCell::new(i2c);

    let imu = match Qmi8658::new(RefCellDevice::new(&bus), qmi8658_imu::DEFAULT_I2C_ADDR)
        .or_else(|_| Qmi8658::new(RefCellDevice::new(&bus), qmi8658_imu::ALT_I2C_ADDR))
    {
        Ok(imu) => imu,
        Err(e) => fatal("imu init", e),
    };
    let compass = match Qmc5883l::new(RefCellDevice::new(&bus), qmc5883l::DEFAULT_I2C_ADDR) {
        Ok(compass) => compass,
        Err(e) => fatal("compass init", e),
    };
    let mut sensors = Board::new(imu, compass, AxisMap::BREAKOUT);

    let mut controller = match Controller::new(TrackerSettings::default()) {
        Ok(c) => c,
        Err(e) => fatal("config", e),
    };
    info!("twist matrix up, tick {} ms", controller.config().tick_ms);

    let mut delay = Delay::new();
    loop {
        match controller.run(&mut sensors, &mut panel, &mut delay) {
            Ok(never) => match never {},
            Err(e) => warn!("tick failed, retrying: {}", e),
        }
        delay.delay_ms(RETRY_MS);
    }
}
