//! Pivot-relative rotation tracking on a circular index space.
//!
//! The first stable position after a reset becomes the pivot. From then on
//! every tick looks at the sweep `previous -> pivot -> current`: a clean sweep
//! out of the pivot records which way the gesture is leaving, and a clean
//! sweep back into (or through) the pivot in that same direction completes a
//! turn. Coming back the way it left only flips the leaving direction, so
//! wobbling around the pivot never counts.

use log::debug;

use crate::circular::{advance, flow, normalize, Direction, Position};
use crate::config::TrackerConfig;
use crate::hysteresis::HysteresisBuffer;

/// What one [`RotationTracker::step`] saw and did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub previous: Position,
    pub current: Position,
    pub pivot: Position,
    /// `flow(previous, pivot, current)` for this tick.
    pub flow: Direction,
    /// Leaving direction after this tick.
    pub leaving: Direction,
    /// Set when this tick completed a turn, in the direction it was made.
    pub turn: Option<Direction>,
}

#[derive(Clone, Debug)]
pub struct RotationTracker {
    radix: u16,
    turn_min: u8,
    turn_max: u8,
    buffer: HysteresisBuffer<Position>,
    pivot: Option<Position>,
    previous: Option<Position>,
    current: Option<Position>,
    leaving: Direction,
    turns: u8,
}

impl RotationTracker {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            radix: config.radix,
            turn_min: config.turn_min,
            turn_max: config.turn_max,
            buffer: HysteresisBuffer::new(config.debounce),
            pivot: None,
            previous: None,
            current: None,
            leaving: Direction::None,
            turns: config.turn_min,
        }
    }

    pub fn radix(&self) -> u16 {
        self.radix
    }

    pub fn pivot(&self) -> Option<Position> {
        self.pivot
    }

    pub fn previous(&self) -> Option<Position> {
        self.previous
    }

    pub fn current(&self) -> Option<Position> {
        self.current
    }

    pub fn leaving(&self) -> Direction {
        self.leaving
    }

    pub fn turns(&self) -> u8 {
        self.turns
    }

    pub fn is_tracking(&self) -> bool {
        self.pivot.is_some()
    }

    /// Feed one raw position (any integer, normalized onto the circle).
    pub fn step(&mut self, raw: i32) -> StepReport {
        let sample = self.buffer.value(normalize(raw, self.radix));
        let previous = self.current.unwrap_or(sample);
        let current = sample;
        let pivot = match self.pivot {
            Some(p) => p,
            None => {
                debug!("rotation: pivot at {}/{}", current, self.radix);
                self.pivot = Some(current);
                current
            }
        };

        let flow = flow(previous, pivot, current, self.radix);

        // Back at (or across) the pivot, moving the same way it left.
        let mut turn = None;
        if previous != pivot && flow.is_rotation() && flow == self.leaving {
            let next = (self.turns as i32 + flow.signum())
                .clamp(self.turn_min as i32, self.turn_max as i32);
            self.turns = next as u8;
            turn = Some(flow);
            debug!("rotation: turn {:?}, count {}", flow, self.turns);
        }

        if flow.is_rotation() && flow != self.leaving {
            debug!("rotation: leaving {:?}", flow);
            self.leaving = flow;
        }

        self.previous = Some(previous);
        self.current = Some(current);

        StepReport {
            previous,
            current,
            pivot,
            flow,
            leaving: self.leaving,
            turn,
        }
    }

    /// One more step in the leaving direction would land on the pivot: the arc
    /// covers the whole ring.
    pub fn is_closed(&self) -> bool {
        match (self.pivot, self.current) {
            (Some(pivot), Some(current)) if self.leaving.is_rotation() => {
                advance(current, self.leaving, self.radix) == pivot
            }
            _ => false,
        }
    }

    pub fn clear_turns(&mut self) {
        self.turns = self.turn_min;
    }

    /// Back to a freshly constructed tracker. Safe to call any number of times.
    pub fn reset(&mut self) {
        self.buffer.reset();
        self.pivot = None;
        self.previous = None;
        self.current = None;
        self.leaving = Direction::None;
        self.turns = self.turn_min;
    }
}
