//! Flat / on-edge classification with hysteresis on both the boundary and
//! the sample count.

use log::{debug, info};

use crate::config::OrientationConfig;
use crate::hysteresis::HysteresisBuffer;
use crate::sensor::AccelSample;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Lying face up or face down.
    Flat,
    /// Standing on one of its edges.
    Edge,
}

pub struct OrientationClassifier {
    edge_margin_sq: i64,
    flat_margin: i32,
    ceiling_sq: i64,
    buffer: HysteresisBuffer<Orientation>,
}

impl OrientationClassifier {
    /// Starts out `Flat`.
    pub fn new(config: &OrientationConfig) -> Self {
        let edge = config.edge_margin as i64;
        let ceiling = config.gravity_ceiling as i64;
        Self {
            edge_margin_sq: edge * edge,
            flat_margin: config.flat_margin,
            ceiling_sq: ceiling * ceiling,
            buffer: HysteresisBuffer::with_value(Orientation::Flat, config.debounce),
        }
    }

    pub fn current(&self) -> Orientation {
        self.buffer.current().unwrap_or(Orientation::Flat)
    }

    /// True when the sample is too heavy to be gravity alone.
    #[inline]
    pub fn is_rejected(&self, sample: &AccelSample) -> bool {
        sample.mag_sq() > self.ceiling_sq
    }

    /// Raw classification, relative to the current stable orientation.
    ///
    /// Leaving `Flat` looks at the in-plane component, leaving `Edge` looks at
    /// |z|. Between the two margins neither check fires, so a sample sitting
    /// on the boundary keeps whatever orientation is already stable.
    pub fn classify(&self, sample: &AccelSample) -> Orientation {
        match self.current() {
            Orientation::Flat if sample.planar_mag_sq() > self.edge_margin_sq => Orientation::Edge,
            Orientation::Flat => Orientation::Flat,
            Orientation::Edge if (sample.z as i64).abs() > self.flat_margin as i64 => {
                Orientation::Flat
            }
            Orientation::Edge => Orientation::Edge,
        }
    }

    /// Feed one sample. `on_change` runs before the new orientation is returned.
    pub fn poll(
        &mut self,
        sample: &AccelSample,
        on_change: impl FnOnce(Orientation),
    ) -> Orientation {
        if self.is_rejected(sample) {
            debug!("orientation: rejected sample {:?}", sample);
            return self.current();
        }
        let raw = self.classify(sample);
        self.buffer.value_with(raw, |next| {
            info!("orientation -> {:?}", next);
            on_change(*next);
        })
    }

    /// What `poll` would return for `sample`, without changing anything.
    pub fn peek(&self, sample: &AccelSample) -> Orientation {
        if self.is_rejected(sample) {
            return self.current();
        }
        self.buffer.peek(self.classify(sample))
    }

    pub fn reset(&mut self) {
        self.buffer.reset_to(Orientation::Flat);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EDGE_MARGIN, FLAT_MARGIN};

    const FLAT: AccelSample = AccelSample::new(0, 0, -1000);
    const EDGE: AccelSample = AccelSample::new(0, 1000, 0);
    // 45 degrees: inside both hysteresis bands
    const SLANTED: AccelSample = AccelSample::new(0, 707, -707);

    fn classifier(debounce: u16) -> OrientationClassifier {
        OrientationClassifier::new(&OrientationConfig {
            debounce,
            ..OrientationConfig::default()
        })
    }

    #[test]
    fn starts_flat() {
        assert_eq!(classifier(3).current(), Orientation::Flat);
    }

    #[test]
    fn flips_after_debounce_and_fires_callback_once() {
        let mut c = classifier(3);
        let mut changes = 0;
        for _ in 0..3 {
            assert_eq!(c.poll(&EDGE, |_| changes += 1), Orientation::Flat);
        }
        assert_eq!(c.poll(&EDGE, |_| changes += 1), Orientation::Edge);
        for _ in 0..10 {
            assert_eq!(c.poll(&EDGE, |_| changes += 1), Orientation::Edge);
        }
        assert_eq!(changes, 1);
    }

    #[test]
    fn boundary_sample_holds_either_state() {
        let mut c = classifier(0);
        assert_eq!(c.poll(&SLANTED, |_| {}), Orientation::Flat);
        assert_eq!(c.poll(&EDGE, |_| {}), Orientation::Edge);
        assert_eq!(c.poll(&SLANTED, |_| {}), Orientation::Edge);
        assert_eq!(c.poll(&FLAT, |_| {}), Orientation::Flat);
    }

    #[test]
    fn margins_are_asymmetric() {
        // in-plane short of EDGE_MARGIN, |z| past FLAT_MARGIN
        let leaning = AccelSample::new(0, 780, -780);
        assert!(780 < EDGE_MARGIN && 780 > FLAT_MARGIN);
        let mut c = classifier(0);
        assert_eq!(c.poll(&leaning, |_| {}), Orientation::Flat);
        assert_eq!(c.poll(&EDGE, |_| {}), Orientation::Edge);
        assert_eq!(c.poll(&leaning, |_| {}), Orientation::Flat);
    }

    #[test]
    fn heavy_sample_never_flips() {
        let mut c = classifier(0);
        let shake = AccelSample::new(1500, 1500, 0);
        let mut changes = 0;
        for _ in 0..5 {
            assert_eq!(c.poll(&shake, |_| changes += 1), Orientation::Flat);
        }
        assert_eq!(changes, 0);

        // also does not disturb a pending flip count
        let mut c = classifier(2);
        c.poll(&EDGE, |_| {});
        c.poll(&EDGE, |_| {});
        c.poll(&shake, |_| {});
        assert_eq!(c.poll(&EDGE, |_| {}), Orientation::Edge);
    }

    #[test]
    fn interrupted_flip_starts_over() {
        let mut c = classifier(2);
        c.poll(&EDGE, |_| {});
        c.poll(&EDGE, |_| {});
        c.poll(&FLAT, |_| {});
        c.poll(&EDGE, |_| {});
        c.poll(&EDGE, |_| {});
        assert_eq!(c.current(), Orientation::Flat);
        assert_eq!(c.poll(&EDGE, |_| {}), Orientation::Edge);
    }

    #[test]
    fn peek_predicts_poll() {
        let mut c = classifier(1);
        assert_eq!(c.peek(&EDGE), Orientation::Flat);
        c.poll(&EDGE, |_| {});
        assert_eq!(c.peek(&EDGE), Orientation::Edge);
        assert_eq!(c.current(), Orientation::Flat);
        assert_eq!(c.peek(&AccelSample::new(2000, 0, 0)), Orientation::Flat);
    }
}
