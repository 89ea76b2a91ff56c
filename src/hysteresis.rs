//! Sample-count debounce.
//!
//! A [`HysteresisBuffer`] holds a stable value and only lets a new raw reading
//! through once readings have disagreed with it for more than `threshold`
//! consecutive ticks. There is no clock involved: one call is one sample.

#[derive(Clone, Debug)]
pub struct HysteresisBuffer<T> {
    stable: Option<T>,
    pending: u16,
    threshold: u16,
}

impl<T> HysteresisBuffer<T>
where
    T: Copy + PartialEq,
{
    /// Empty buffer: the first reading is adopted as-is.
    pub const fn new(threshold: u16) -> Self {
        Self {
            stable: None,
            pending: 0,
            threshold,
        }
    }

    /// Buffer that already holds `value`, so even the first reading is debounced.
    pub const fn with_value(value: T, threshold: u16) -> Self {
        Self {
            stable: Some(value),
            pending: 0,
            threshold,
        }
    }

    pub fn current(&self) -> Option<T> {
        self.stable
    }

    /// Consecutive disagreeing samples seen since the last agreement or commit.
    pub fn pending(&self) -> u16 {
        self.pending
    }

    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    /// Feed one raw reading and get the stable value back.
    #[inline]
    pub fn value(&mut self, raw: T) -> T {
        self.value_with(raw, |_| {})
    }

    /// Like [`value`](Self::value), calling `on_change` with the new value when a
    /// reading gets committed.
    pub fn value_with(&mut self, raw: T, on_change: impl FnOnce(&T)) -> T {
        let Some(stable) = self.stable else {
            self.stable = Some(raw);
            self.pending = 0;
            return raw;
        };

        if raw == stable {
            self.pending = 0;
            return stable;
        }

        self.pending = self.pending.saturating_add(1);
        if self.pending > self.threshold {
            self.stable = Some(raw);
            self.pending = 0;
            on_change(&raw);
            return raw;
        }
        stable
    }

    /// The value [`value`](Self::value) would return for `raw`, without touching state.
    pub fn peek(&self, raw: T) -> T {
        match self.stable {
            None => raw,
            Some(stable) if raw == stable => stable,
            Some(_) if self.pending.saturating_add(1) > self.threshold => raw,
            Some(stable) => stable,
        }
    }

    /// Forget everything, including the stable value.
    pub fn reset(&mut self) {
        self.stable = None;
        self.pending = 0;
    }

    /// Forget pending samples and hold `value` as the stable reading.
    pub fn reset_to(&mut self, value: T) {
        self.stable = Some(value);
        self.pending = 0;
    }
}
