//! Minimal QMI8658 accelerometer bring-up. Only the accelerometer is
//! enabled; the gyro stays powered down.

use core::fmt;

use embedded_hal::i2c;

use crate::sensor::AccelSample;

pub const DEFAULT_I2C_ADDR: u8 = 0x6B; // SA0 pulled high
pub const ALT_I2C_ADDR: u8 = 0x6A;

const REG_WHO_AM_I: u8 = 0x00;
const REG_CTRL1: u8 = 0x02; // serial interface
const REG_CTRL2: u8 = 0x03; // accel config
const REG_CTRL7: u8 = 0x08; // sensor enable
const REG_RESET: u8 = 0x60;
const REG_ACC_START: u8 = 0x35; // AX_L .. AZ_H

const CTRL1_ADDR_AUTO_INC: u8 = 0x40;
const CTRL2_8G_500HZ: u8 = 0x24;
const CTRL7_ACCEL_ENABLE: u8 = 0x01;
const RESET_CMD: u8 = 0xB0;

const WHO_AM_I_QMI8658: u8 = 0x05;

/// Counts per g at the +/-8g range.
pub const COUNTS_PER_G: i32 = 4096;

#[derive(Debug)]
pub enum ImuError<E> {
    Bus(E),
    BadWhoAmI(u8),
}

impl<E> From<E> for ImuError<E> {
    fn from(e: E) -> Self {
        ImuError::Bus(e)
    }
}

impl<E: fmt::Debug> fmt::Display for ImuError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImuError::Bus(e) => write!(f, "QMI8658 bus error: {e:?}"),
            ImuError::BadWhoAmI(who) => write!(f, "QMI8658 WHO_AM_I 0x{who:02X}"),
        }
    }
}

pub struct Qmi8658<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Qmi8658<I2C>
where
    I2C: i2c::I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Result<Self, ImuError<I2C::Error>> {
        let mut this = Self { i2c, address };
        this.init()?;
        Ok(this)
    }

    pub fn who_am_i(&mut self) -> Result<u8, ImuError<I2C::Error>> {
        self.read_reg(REG_WHO_AM_I)
    }

    fn init(&mut self) -> Result<(), ImuError<I2C::Error>> {
        let who = self.who_am_i()?;
        if who != WHO_AM_I_QMI8658 {
            return Err(ImuError::BadWhoAmI(who));
        }

        self.write_reg(REG_RESET, RESET_CMD)?;
        self.write_reg(REG_CTRL1, CTRL1_ADDR_AUTO_INC)?;
        self.write_reg(REG_CTRL2, CTRL2_8G_500HZ)?;
        self.write_reg(REG_CTRL7, CTRL7_ACCEL_ENABLE)?;
        Ok(())
    }

    fn write_reg(&mut self, reg: u8, val: u8) -> Result<(), ImuError<I2C::Error>> {
        self.i2c.write(self.address, &[reg, val])?;
        Ok(())
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, ImuError<I2C::Error>> {
        let mut out = [0u8];
        self.i2c.write_read(self.address, &[reg], &mut out)?;
        Ok(out[0])
    }

    /// Raw accelerometer counts, chip axes.
    pub fn read_raw(&mut self) -> Result<[i16; 3], ImuError<I2C::Error>> {
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(self.address, &[REG_ACC_START], &mut buf)?;
        Ok([
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ])
    }

    /// Acceleration in milli-g, chip axes.
    pub fn read_accel(&mut self) -> Result<AccelSample, ImuError<I2C::Error>> {
        let [x, y, z] = self.read_raw()?;
        let mg = |v: i16| v as i32 * 1000 / COUNTS_PER_G;
        Ok(AccelSample::new(mg(x), mg(y), mg(z)))
    }

    pub fn into_inner(self) -> I2C {
        self.i2c
    }
}
