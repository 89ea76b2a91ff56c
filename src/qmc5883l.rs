//! QMC5883L 3-axis magnetometer, used as a tilt-uncompensated compass.
//! Good enough while the device lies flat, which is the only time the
//! heading is read.

use core::fmt;

use embedded_hal::i2c;

pub const DEFAULT_I2C_ADDR: u8 = 0x0D;

const REG_DATA_START: u8 = 0x00; // X_L .. Z_H
const REG_STATUS: u8 = 0x06;
const REG_CONTROL1: u8 = 0x09;
const REG_SET_RESET_PERIOD: u8 = 0x0B;
const REG_CHIP_ID: u8 = 0x0D;

const CHIP_ID: u8 = 0xFF;
// continuous, 200 Hz, 8 G, 512x oversampling
const CONTROL1_CONTINUOUS: u8 = 0x1D;
const SET_RESET_RECOMMENDED: u8 = 0x01;

const STATUS_OVERFLOW: u8 = 0x02;

#[derive(Debug)]
pub enum CompassError<E> {
    Bus(E),
    BadChipId(u8),
    /// A field component exceeded the measurement range.
    Overflow,
}

impl<E> From<E> for CompassError<E> {
    fn from(e: E) -> Self {
        CompassError::Bus(e)
    }
}

impl<E: fmt::Debug> fmt::Display for CompassError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompassError::Bus(e) => write!(f, "QMC5883L bus error: {e:?}"),
            CompassError::BadChipId(id) => write!(f, "QMC5883L chip id 0x{id:02X}"),
            CompassError::Overflow => f.write_str("QMC5883L field overflow"),
        }
    }
}

pub struct Qmc5883l<I2C> {
    i2c: I2C,
    address: u8,
    declination_degrees: i32,
}

impl<I2C> Qmc5883l<I2C>
where
    I2C: i2c::I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Result<Self, CompassError<I2C::Error>> {
        let mut this = Self {
            i2c,
            address,
            declination_degrees: 0,
        };
        this.init()?;
        Ok(this)
    }

    /// Added to every heading, to turn magnetic north into true north.
    pub fn with_declination(mut self, degrees: i32) -> Self {
        self.declination_degrees = degrees;
        self
    }

    fn init(&mut self) -> Result<(), CompassError<I2C::Error>> {
        let id = self.read_reg(REG_CHIP_ID)?;
        if id != CHIP_ID {
            return Err(CompassError::BadChipId(id));
        }
        self.write_reg(REG_SET_RESET_PERIOD, SET_RESET_RECOMMENDED)?;
        self.write_reg(REG_CONTROL1, CONTROL1_CONTINUOUS)?;
        Ok(())
    }

    fn write_reg(&mut self, reg: u8, val: u8) -> Result<(), CompassError<I2C::Error>> {
        self.i2c.write(self.address, &[reg, val])?;
        Ok(())
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, CompassError<I2C::Error>> {
        let mut out = [0u8];
        self.i2c.write_read(self.address, &[reg], &mut out)?;
        Ok(out[0])
    }

    /// Raw field counts `[x, y, z]`.
    pub fn read_raw(&mut self) -> Result<[i16; 3], CompassError<I2C::Error>> {
        if self.read_reg(REG_STATUS)? & STATUS_OVERFLOW != 0 {
            return Err(CompassError::Overflow);
        }
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(self.address, &[REG_DATA_START], &mut buf)?;
        Ok([
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ])
    }

    /// Heading in whole degrees, clockwise from north, `[0, 360)`.
    pub fn read_heading(&mut self) -> Result<i32, CompassError<I2C::Error>> {
        let [x, y, _] = self.read_raw()?;
        Ok((field_heading(x, y) + self.declination_degrees).rem_euclid(360))
    }

    pub fn into_inner(self) -> I2C {
        self.i2c
    }
}

/// Heading of the horizontal field vector with the chip's x axis forward.
pub fn field_heading(x: i16, y: i16) -> i32 {
    let rad = libm::atan2f(y as f32, x as f32);
    let deg = libm::roundf(rad * 180.0 / core::f32::consts::PI) as i32;
    deg.rem_euclid(360)
}
