#![cfg_attr(not(test), no_std)]

pub mod circular;
pub mod config;
pub mod controller;
pub mod error;
pub mod hysteresis;
pub mod matrix;
pub mod orientation;
pub mod panel;
pub mod ring_tracker;
pub mod rotation;
pub mod sensor;
pub mod turn_tracker;

#[cfg(feature = "firmware")]
pub mod board;
#[cfg(feature = "firmware")]
pub mod display;
#[cfg(feature = "firmware")]
pub mod qmc5883l;
#[cfg(feature = "firmware")]
pub mod qmi8658_imu;
#[cfg(feature = "firmware")]
pub mod wiring;

pub use config::Config;
pub use controller::{Controller, TickReport};
pub use error::{ConfigError, Error};
pub use matrix::{DisplayRenderer, MatrixFrame, RenderCommand};
pub use orientation::Orientation;
pub use sensor::{AccelSample, SensorSource};
