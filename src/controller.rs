//! The tick loop tying sensors, the orientation classifier, both trackers
//! and the matrix together.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::Config;
use crate::error::{ConfigError, Error};
use crate::matrix::{DisplayRenderer, MatrixPainter, RenderCommand};
use crate::orientation::{Orientation, OrientationClassifier};
use crate::ring_tracker::RingTracker;
use crate::sensor::SensorSource;
use crate::turn_tracker::TurnTracker;

/// Outcome of one [`Controller::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub orientation: Orientation,
    /// The orientation flipped this tick and both trackers were reset.
    pub changed: bool,
    pub command: RenderCommand,
}

pub struct Controller {
    config: Config,
    classifier: OrientationClassifier,
    ring: RingTracker,
    turns: TurnTracker,
    painter: MatrixPainter,
}

impl Controller {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            classifier: OrientationClassifier::new(&config.orientation),
            ring: RingTracker::new(&config.ring, config.ring_origin_degrees),
            turns: TurnTracker::new(&config.heading, &config.tilt),
            painter: MatrixPainter::new(config.ring_cells)?,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn orientation(&self) -> Orientation {
        self.classifier.current()
    }

    pub fn ring(&self) -> &RingTracker {
        &self.ring
    }

    pub fn turns(&self) -> &TurnTracker {
        &self.turns
    }

    /// Read, classify, track, draw.
    ///
    /// Every sensor read happens before any state is touched, so a failed
    /// read leaves the controller exactly as it was. A render failure is
    /// reported after the trackers already advanced.
    pub fn tick<S, D>(
        &mut self,
        sensors: &mut S,
        display: &mut D,
    ) -> Result<TickReport, Error<S::Error, D::Error>>
    where
        S: SensorSource,
        D: DisplayRenderer,
    {
        let sample = sensors
            .read_accelerometer()
            .map_err(Error::SensorReadFailure)?;
        let heading = match self.classifier.peek(&sample) {
            Orientation::Flat => Some(
                sensors
                    .read_compass_heading()
                    .map_err(Error::SensorReadFailure)?,
            ),
            Orientation::Edge => None,
        };

        let shaken = self.classifier.is_rejected(&sample);
        let mut changed = false;
        let ring = &mut self.ring;
        let turns = &mut self.turns;
        let orientation = self.classifier.poll(&sample, |next| {
            info!("controller: now {:?}, trackers reset", next);
            ring.reset();
            turns.reset();
            changed = true;
        });

        let command = match (orientation, heading) {
            (Orientation::Flat, Some(degrees)) if shaken => self.turns.frame_held(degrees),
            (Orientation::Flat, Some(degrees)) => self.turns.frame(degrees, &sample),
            (Orientation::Edge, _) => self.ring.frame(&sample),
            // peek and poll agree on the same sample
            (Orientation::Flat, None) => RenderCommand::Blank,
        };

        display.clear().map_err(Error::RenderFailure)?;
        self.painter
            .draw(&command, display)
            .map_err(Error::RenderFailure)?;
        display.present().map_err(Error::RenderFailure)?;

        Ok(TickReport {
            orientation,
            changed,
            command,
        })
    }

    /// Tick forever, `tick_ms` apart. Only returns to hand back an error.
    pub fn run<S, D, T>(
        &mut self,
        sensors: &mut S,
        display: &mut D,
        delay: &mut T,
    ) -> Result<Infallible, Error<S::Error, D::Error>>
    where
        S: SensorSource,
        D: DisplayRenderer,
        T: DelayNs,
    {
        loop {
            self.tick(sensors, display)?;
            delay.delay_ms(self.config.tick_ms);
        }
    }

    /// Back to power-on state: `Flat`, no pivots, zero turns.
    pub fn reset(&mut self) {
        self.classifier.reset();
        self.ring.reset();
        self.turns.reset();
    }
}
