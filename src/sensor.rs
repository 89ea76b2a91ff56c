//! Sensor-side contract and the geometry that turns raw readings into
//! circular positions.
//!
//! Accelerations are in milli-g (1000 = 1 g). The display frame is x to the
//! right and y downwards, angles are measured clockwise from display-up.

use crate::circular::{normalize, Position};

/// One accelerometer reading, milli-g.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccelSample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl AccelSample {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Squared magnitude of the in-plane (x, y) component.
    #[inline]
    pub fn planar_mag_sq(&self) -> i64 {
        let (x, y) = (self.x as i64, self.y as i64);
        x * x + y * y
    }

    #[inline]
    pub fn mag_sq(&self) -> i64 {
        let z = self.z as i64;
        self.planar_mag_sq() + z * z
    }

    /// Direction gravity points to on the face of the display, in whole degrees.
    pub fn face_degrees(&self) -> i32 {
        vector_degrees(self.x, -self.y)
    }
}

/// Where the core gets its raw samples from. Each call is one synchronous read.
pub trait SensorSource {
    type Error;

    fn read_accelerometer(&mut self) -> Result<AccelSample, Self::Error>;

    /// Compass heading in degrees. Any integer is accepted, it gets normalized.
    fn read_compass_heading(&mut self) -> Result<i32, Self::Error>;
}

impl<S: SensorSource + ?Sized> SensorSource for &mut S {
    type Error = S::Error;

    fn read_accelerometer(&mut self) -> Result<AccelSample, Self::Error> {
        (**self).read_accelerometer()
    }

    fn read_compass_heading(&mut self) -> Result<i32, Self::Error> {
        (**self).read_compass_heading()
    }
}

/// Angle of the vector `(east, north)` clockwise from north, in `[0, 360)`.
pub fn vector_degrees(east: i32, north: i32) -> i32 {
    if east == 0 && north == 0 {
        return 0;
    }
    let rad = libm::atan2f(east as f32, north as f32);
    let deg = libm::roundf(rad * 180.0 / core::f32::consts::PI) as i32;
    deg.rem_euclid(360)
}

/// Bucket an angle onto `radix` evenly spaced positions, rounding to the
/// nearest one. Bucket 0 is centred on `origin_degrees`.
pub fn degrees_to_position(degrees: i32, origin_degrees: i32, radix: u16) -> Position {
    if radix == 0 {
        return 0;
    }
    let deg = (degrees as i64 - origin_degrees as i64).rem_euclid(360);
    let r = radix as i64;
    let bucket = (deg * r + 180) / 360;
    normalize(bucket as i32, radix)
}

/// Accelerometer tilt quantized onto a `[-range, range]` grid offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tilt {
    pub x: i8,
    pub y: i8,
    pub x_saturated: bool,
    pub y_saturated: bool,
}

impl Tilt {
    /// `divisor` milli-g per grid step; a zero divisor is rejected by config
    /// validation, here it just reads as level.
    pub fn from_sample(sample: &AccelSample, divisor: i32, range: i8) -> Self {
        let (x, x_saturated) = quantize(sample.x, divisor, range);
        let (y, y_saturated) = quantize(sample.y, divisor, range);
        Self {
            x,
            y,
            x_saturated,
            y_saturated,
        }
    }

    pub fn is_centered(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

fn quantize(value: i32, divisor: i32, range: i8) -> (i8, bool) {
    let Some(step) = value.checked_div(divisor) else {
        return (0, false);
    };
    let range = range.max(0) as i32;
    let clamped = step.clamp(-range, range);
    (clamped as i8, step.unsigned_abs() >= range as u32)
}
