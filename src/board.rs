//! The sensor breakout as a [`SensorSource`]: QMI8658 for gravity, QMC5883L
//! for heading, both behind one shared I2C bus.

use core::fmt;

use embedded_hal::i2c;

use crate::qmc5883l::{CompassError, Qmc5883l};
use crate::qmi8658_imu::{ImuError, Qmi8658};
use crate::sensor::{AccelSample, SensorSource};

/// How the IMU chip sits relative to the display frame (x right, y down,
/// z out of the screen).
#[derive(Clone, Copy, Debug)]
pub struct AxisMap {
    pub swap_xy: bool,
    pub flip_x: bool,
    pub flip_y: bool,
    pub flip_z: bool,
}

impl AxisMap {
    /// Breakout mounted flat behind the panel, silkscreen arrow pointing up.
    pub const BREAKOUT: AxisMap = AxisMap {
        swap_xy: false,
        flip_x: false,
        flip_y: true,
        flip_z: false,
    };

    pub fn apply(&self, s: AccelSample) -> AccelSample {
        let (x, y) = if self.swap_xy { (s.y, s.x) } else { (s.x, s.y) };
        let sign = |flip: bool, v: i32| if flip { -v } else { v };
        AccelSample::new(
            sign(self.flip_x, x),
            sign(self.flip_y, y),
            sign(self.flip_z, s.z),
        )
    }
}

#[derive(Debug)]
pub enum SensorError<E> {
    Imu(ImuError<E>),
    Compass(CompassError<E>),
}

impl<E: fmt::Debug> fmt::Display for SensorError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::Imu(e) => write!(f, "{e}"),
            SensorError::Compass(e) => write!(f, "{e}"),
        }
    }
}

pub struct Board<I2C> {
    imu: Qmi8658<I2C>,
    compass: Qmc5883l<I2C>,
    axes: AxisMap,
}

impl<I2C> Board<I2C>
where
    I2C: i2c::I2c,
{
    pub fn new(imu: Qmi8658<I2C>, compass: Qmc5883l<I2C>, axes: AxisMap) -> Self {
        Self { imu, compass, axes }
    }
}

impl<I2C> SensorSource for Board<I2C>
where
    I2C: i2c::I2c,
{
    type Error = SensorError<I2C::Error>;

    fn read_accelerometer(&mut self) -> Result<AccelSample, Self::Error> {
        let raw = self.imu.read_accel().map_err(SensorError::Imu)?;
        Ok(self.axes.apply(raw))
    }

    fn read_compass_heading(&mut self) -> Result<i32, Self::Error> {
        self.compass.read_heading().map_err(SensorError::Compass)
    }
}
