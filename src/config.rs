//! Tuning constants and the runtime configuration built from them.
//!
//! Accelerometer values are milli-g. Debounce values are sample counts: a
//! reading has to disagree with the stable value for more than that many
//! consecutive ticks before it is accepted.

use crate::error::ConfigError;
use crate::matrix::{GridPoint, MAX_RING_CELLS, RING_5X5};

/// Consecutive disagreeing samples before the orientation flips.
pub const ORIENTATION_SENS: u16 = 20;
/// Flat -> Edge once the in-plane component exceeds this.
pub const EDGE_MARGIN: i32 = 800;
/// Edge -> Flat once |z| exceeds this. Lower than `EDGE_MARGIN`; the dead band
/// also comes from each direction looking at a different axis.
pub const FLAT_MARGIN: i32 = 750;
/// Anything heavier than this is the device being moved, not gravity.
pub const GRAVITY_CEILING: i32 = 1_500;

pub const PERIMETER_LEN: u16 = 18;
pub const HEADING_BUCKETS: u16 = 18;
pub const RING_SENS: u16 = 3;
pub const HEADING_SENS: u16 = 4;
/// Ring index 0 sits next to the top-left corner, one bucket left of up.
pub const RING_ORIGIN_DEGREES: i32 = 340;

/// milli-g per tilt dot step.
pub const TILT_DIVISOR: i32 = 200;
pub const TILT_RANGE: i8 = 2;

pub const TURN_MIN: u8 = 0;
pub const TURN_MAX: u8 = 9;

pub const TICK_MS: u32 = 20;

/// When tilting the device zeroes the turn counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TurnResetPolicy {
    Disabled,
    /// Either tilt axis reaches the edge of the grid.
    #[default]
    AnyAxis,
    /// Both axes at once: the dot sits in a corner.
    BothAxes,
    /// Saturating arms the reset, it fires once the dot is back in the centre.
    ReturnToCenter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrientationConfig {
    pub edge_margin: i32,
    pub flat_margin: i32,
    pub gravity_ceiling: i32,
    pub debounce: u16,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            edge_margin: EDGE_MARGIN,
            flat_margin: FLAT_MARGIN,
            gravity_ceiling: GRAVITY_CEILING,
            debounce: ORIENTATION_SENS,
        }
    }
}

impl OrientationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.edge_margin < 0 || self.flat_margin < 0 || self.gravity_ceiling < 0 {
            return Err(ConfigError::NegativeThreshold);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackerConfig {
    pub radix: u16,
    pub debounce: u16,
    pub turn_min: u8,
    pub turn_max: u8,
}

impl TrackerConfig {
    pub const fn new(radix: u16, debounce: u16) -> Self {
        Self {
            radix,
            debounce,
            turn_min: TURN_MIN,
            turn_max: TURN_MAX,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radix == 0 {
            return Err(ConfigError::ZeroRadix);
        }
        if self.turn_min > self.turn_max {
            return Err(ConfigError::InvertedTurnBounds);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TiltConfig {
    pub divisor: i32,
    pub range: i8,
    pub reset_policy: TurnResetPolicy,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            divisor: TILT_DIVISOR,
            range: TILT_RANGE,
            reset_policy: TurnResetPolicy::default(),
        }
    }
}

impl TiltConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.divisor <= 0 {
            return Err(ConfigError::TiltDivisor);
        }
        // range 0 would leave every sample saturated
        if self.range <= 0 {
            return Err(ConfigError::ZeroTiltRange);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub orientation: OrientationConfig,
    /// Edge mode: positions around the matrix border.
    pub ring: TrackerConfig,
    /// Flat mode: compass heading buckets.
    pub heading: TrackerConfig,
    pub tilt: TiltConfig,
    pub ring_origin_degrees: i32,
    pub ring_cells: &'static [GridPoint],
    pub tick_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            orientation: OrientationConfig::default(),
            ring: TrackerConfig::new(PERIMETER_LEN, RING_SENS),
            heading: TrackerConfig::new(HEADING_BUCKETS, HEADING_SENS),
            tilt: TiltConfig::default(),
            ring_origin_degrees: RING_ORIGIN_DEGREES,
            ring_cells: &RING_5X5,
            tick_ms: TICK_MS,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.orientation.validate()?;
        self.ring.validate()?;
        self.heading.validate()?;
        self.tilt.validate()?;
        if self.ring_cells.len() > MAX_RING_CELLS {
            return Err(ConfigError::RingTooLarge);
        }
        if self.ring_cells.len() != self.ring.radix as usize {
            return Err(ConfigError::RingLayoutMismatch {
                radix: self.ring.radix,
                cells: self.ring_cells.len(),
            });
        }
        Ok(())
    }
}
