//! Edge mode: the device stands on an edge and is twisted in its own plane.
//! Gravity's direction on the face picks a cell on the matrix border, and the
//! twist is drawn as an arc around the border starting at the pivot.

use crate::config::TrackerConfig;
use crate::matrix::RenderCommand;
use crate::rotation::RotationTracker;
use crate::sensor::{degrees_to_position, AccelSample};

pub struct RingTracker {
    tracker: RotationTracker,
    origin_degrees: i32,
}

impl RingTracker {
    pub fn new(config: &TrackerConfig, origin_degrees: i32) -> Self {
        Self {
            tracker: RotationTracker::new(config),
            origin_degrees,
        }
    }

    pub fn tracker(&self) -> &RotationTracker {
        &self.tracker
    }

    /// Ring index gravity points at for this sample.
    pub fn position_of(&self, sample: &AccelSample) -> i32 {
        degrees_to_position(sample.face_degrees(), self.origin_degrees, self.tracker.radix()) as i32
    }

    pub fn frame(&mut self, sample: &AccelSample) -> RenderCommand {
        let position = self.position_of(sample);
        self.frame_at(position)
    }

    /// Step with an already computed ring index.
    pub fn frame_at(&mut self, position: i32) -> RenderCommand {
        self.tracker.step(position);
        self.command()
    }

    pub fn command(&self) -> RenderCommand {
        let (Some(pivot), Some(current)) = (self.tracker.pivot(), self.tracker.current()) else {
            return RenderCommand::Blank;
        };
        if self.tracker.is_closed() {
            return RenderCommand::Closed;
        }
        RenderCommand::Arc {
            pivot,
            current,
            direction: self.tracker.leaving(),
        }
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circular::Direction;
    use crate::config::{PERIMETER_LEN, RING_ORIGIN_DEGREES};

    fn ring(debounce: u16) -> RingTracker {
        RingTracker::new(&TrackerConfig::new(PERIMETER_LEN, debounce), RING_ORIGIN_DEGREES)
    }

    #[test]
    fn blank_until_first_sample() {
        let r = ring(2);
        assert_eq!(r.command(), RenderCommand::Blank);
    }

    #[test]
    fn gravity_picks_the_ring_cell() {
        let r = ring(0);
        // gravity towards display-up -> bucket centred on 0 degrees
        assert_eq!(r.position_of(&AccelSample::new(0, -1000, 0)), 1);
        // towards the bottom edge
        assert_eq!(r.position_of(&AccelSample::new(0, 1000, 0)), 10);
        // towards the right edge, halfway between the two (4, 2) entries
        assert_eq!(r.position_of(&AccelSample::new(1000, 0, 0)), 6);
    }

    #[test]
    fn arc_from_pivot_to_current() {
        let mut r = ring(2);
        let mut last = RenderCommand::Blank;
        for p in [5, 5, 5, 6, 6, 6, 6] {
            last = r.frame_at(p);
        }
        assert_eq!(
            last,
            RenderCommand::Arc {
                pivot: 5,
                current: 6,
                direction: Direction::Clockwise,
            }
        );
    }

    #[test]
    fn arc_closes_just_before_pivot() {
        let mut r = ring(0);
        for p in 0..17 {
            r.frame_at(p);
        }
        assert_eq!(r.frame_at(17), RenderCommand::Closed);
        // back on the pivot the arc is a single cell again
        assert_eq!(
            r.frame_at(0),
            RenderCommand::Arc {
                pivot: 0,
                current: 0,
                direction: Direction::Clockwise,
            }
        );
    }

    #[test]
    fn reset_forgets_the_pivot() {
        let mut r = ring(0);
        r.frame_at(3);
        r.frame_at(4);
        r.reset();
        assert_eq!(r.command(), RenderCommand::Blank);
        r.frame_at(9);
        assert_eq!(r.tracker().pivot(), Some(9));
    }
}
