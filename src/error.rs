//! Error types shared by the core.

use core::fmt;

/// Rejected configuration. Raised once, at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A circular index space must have at least one position.
    ZeroRadix,
    /// Accelerometer margins and ceilings are magnitudes.
    NegativeThreshold,
    /// Tilt steps are milli-g per step and must be positive.
    TiltDivisor,
    /// The tilt dot needs at least one step each way.
    ZeroTiltRange,
    /// `turn_min` is above `turn_max`.
    InvertedTurnBounds,
    /// The perimeter radix does not match the number of ring cells.
    RingLayoutMismatch { radix: u16, cells: usize },
    /// More ring cells than the layout can hold.
    RingTooLarge,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroRadix => f.write_str("radix must be at least 1"),
            ConfigError::NegativeThreshold => f.write_str("thresholds must not be negative"),
            ConfigError::TiltDivisor => f.write_str("tilt divisor must be positive"),
            ConfigError::ZeroTiltRange => f.write_str("tilt range must be at least 1"),
            ConfigError::InvertedTurnBounds => f.write_str("turn_min exceeds turn_max"),
            ConfigError::RingLayoutMismatch { radix, cells } => {
                write!(f, "perimeter radix {radix} does not match {cells} ring cells")
            }
            ConfigError::RingTooLarge => f.write_str("ring layout exceeds capacity"),
        }
    }
}

/// Everything a controller tick can fail with.
///
/// `S` is the sensor source's error, `D` the display renderer's.
#[derive(Debug, PartialEq, Eq)]
pub enum Error<S, D> {
    /// A sensor read failed. Tracking state was left untouched; retrying is
    /// up to the caller.
    SensorReadFailure(S),
    RenderFailure(D),
    InvalidConfiguration(ConfigError),
}

impl<S, D> From<ConfigError> for Error<S, D> {
    fn from(e: ConfigError) -> Self {
        Error::InvalidConfiguration(e)
    }
}

impl<S: fmt::Debug, D: fmt::Debug> fmt::Display for Error<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SensorReadFailure(e) => write!(f, "sensor read failed: {e:?}"),
            Error::RenderFailure(e) => write!(f, "render failed: {e:?}"),
            Error::InvalidConfiguration(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}
