//! Flat mode: the device lies face up and is spun like a dial. The compass
//! heading is tracked against the pivot, completed turns show as a digit, and
//! the accelerometer's tilt moves a dot around on top of it.

use log::debug;

use crate::config::{TiltConfig, TrackerConfig, TurnResetPolicy};
use crate::matrix::RenderCommand;
use crate::rotation::RotationTracker;
use crate::sensor::{degrees_to_position, AccelSample, Tilt};

pub struct TurnTracker {
    tracker: RotationTracker,
    tilt: TiltConfig,
    // ReturnToCenter: saturated since the last reset fired
    armed: bool,
    last_tilt: Tilt,
}

impl TurnTracker {
    pub fn new(config: &TrackerConfig, tilt: &TiltConfig) -> Self {
        Self {
            tracker: RotationTracker::new(config),
            tilt: *tilt,
            armed: false,
            last_tilt: Tilt::default(),
        }
    }

    pub fn tracker(&self) -> &RotationTracker {
        &self.tracker
    }

    pub fn turns(&self) -> u8 {
        self.tracker.turns()
    }

    pub fn frame(&mut self, heading_degrees: i32, sample: &AccelSample) -> RenderCommand {
        self.step_heading(heading_degrees);

        let tilt = Tilt::from_sample(sample, self.tilt.divisor, self.tilt.range);
        if self.tilt_resets(&tilt) {
            debug!("turns: cleared by tilt {:?}", tilt);
            self.tracker.clear_turns();
        }
        self.last_tilt = tilt;

        self.command()
    }

    /// Step the heading only. The accelerometer sample of this tick is not
    /// gravity, so the tilt dot stays put and no tilt reset is evaluated.
    pub fn frame_held(&mut self, heading_degrees: i32) -> RenderCommand {
        self.step_heading(heading_degrees);
        self.command()
    }

    fn step_heading(&mut self, heading_degrees: i32) {
        let position = degrees_to_position(heading_degrees, 0, self.tracker.radix());
        self.tracker.step(position as i32);
    }

    fn command(&self) -> RenderCommand {
        RenderCommand::Counter {
            turns: self.tracker.turns(),
            tilt: self.last_tilt,
        }
    }

    fn tilt_resets(&mut self, tilt: &Tilt) -> bool {
        match self.tilt.reset_policy {
            TurnResetPolicy::Disabled => false,
            TurnResetPolicy::AnyAxis => tilt.x_saturated || tilt.y_saturated,
            TurnResetPolicy::BothAxes => tilt.x_saturated && tilt.y_saturated,
            TurnResetPolicy::ReturnToCenter => {
                if tilt.x_saturated || tilt.y_saturated {
                    self.armed = true;
                    false
                } else if self.armed && tilt.is_centered() {
                    self.armed = false;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
        self.armed = false;
        self.last_tilt = Tilt::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HEADING_BUCKETS, TILT_DIVISOR};

    const LEVEL: AccelSample = AccelSample::new(0, 0, -1000);
    const TIPPED_RIGHT: AccelSample = AccelSample::new(2 * TILT_DIVISOR, 0, -900);
    const TIPPED_CORNER: AccelSample = AccelSample::new(2 * TILT_DIVISOR, 2 * TILT_DIVISOR, -800);

    fn turns(policy: TurnResetPolicy) -> TurnTracker {
        TurnTracker::new(
            &TrackerConfig::new(HEADING_BUCKETS, 0),
            &TiltConfig {
                reset_policy: policy,
                ..TiltConfig::default()
            },
        )
    }

    /// One full clockwise revolution in 20 degree steps, starting at 0.
    fn spin(t: &mut TurnTracker) -> RenderCommand {
        let mut last = RenderCommand::Blank;
        for deg in (0..=360).step_by(20) {
            last = t.frame(deg, &LEVEL);
        }
        last
    }

    #[test]
    fn full_revolution_shows_one() {
        let mut t = turns(TurnResetPolicy::AnyAxis);
        let last = spin(&mut t);
        assert_eq!(t.turns(), 1);
        assert_eq!(
            last,
            RenderCommand::Counter {
                turns: 1,
                tilt: Tilt::default(),
            }
        );
    }

    #[test]
    fn any_axis_saturation_clears() {
        let mut t = turns(TurnResetPolicy::AnyAxis);
        spin(&mut t);
        t.frame(0, &TIPPED_RIGHT);
        assert_eq!(t.turns(), 0);
    }

    #[test]
    fn both_axes_needs_a_corner() {
        let mut t = turns(TurnResetPolicy::BothAxes);
        spin(&mut t);
        t.frame(0, &TIPPED_RIGHT);
        assert_eq!(t.turns(), 1);
        t.frame(0, &TIPPED_CORNER);
        assert_eq!(t.turns(), 0);
    }

    #[test]
    fn return_to_center_fires_on_the_way_back() {
        let mut t = turns(TurnResetPolicy::ReturnToCenter);
        spin(&mut t);
        t.frame(0, &TIPPED_RIGHT);
        assert_eq!(t.turns(), 1);
        t.frame(0, &AccelSample::new(TILT_DIVISOR, 0, -950));
        assert_eq!(t.turns(), 1);
        t.frame(0, &LEVEL);
        assert_eq!(t.turns(), 0);

        // disarmed again: a second revolution survives going level
        spin(&mut t);
        t.frame(0, &LEVEL);
        assert_eq!(t.turns(), 1);
    }

    #[test]
    fn disabled_policy_keeps_count() {
        let mut t = turns(TurnResetPolicy::Disabled);
        spin(&mut t);
        t.frame(0, &TIPPED_CORNER);
        assert_eq!(t.turns(), 1);
    }

    #[test]
    fn tilt_dot_follows_the_accelerometer() {
        let mut t = turns(TurnResetPolicy::Disabled);
        let cmd = t.frame(90, &AccelSample::new(-TILT_DIVISOR, 3 * TILT_DIVISOR, -700));
        let RenderCommand::Counter { tilt, .. } = cmd else {
            panic!("expected a counter, got {cmd:?}");
        };
        assert_eq!((tilt.x, tilt.y), (-1, 2));
    }

    #[test]
    fn held_frame_keeps_tilt_and_count() {
        let mut t = turns(TurnResetPolicy::AnyAxis);
        spin(&mut t);
        t.frame(0, &AccelSample::new(TILT_DIVISOR, 0, -950));
        let cmd = t.frame_held(20);
        assert_eq!(t.turns(), 1);
        let RenderCommand::Counter { tilt, .. } = cmd else {
            panic!("expected a counter, got {cmd:?}");
        };
        assert_eq!((tilt.x, tilt.y), (1, 0));
        assert_eq!(t.tracker().current(), Some(1));
    }

    #[test]
    fn reset_clears_turns_and_pivot() {
        let mut t = turns(TurnResetPolicy::Disabled);
        spin(&mut t);
        t.reset();
        assert_eq!(t.turns(), 0);
        assert_eq!(t.tracker().pivot(), None);
    }
}
