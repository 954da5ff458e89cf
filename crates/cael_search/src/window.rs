//! Fixed-size rolling buffer of recent samples.

/// One metric sample on the scan track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Julian Date.
    pub jd: f64,
    /// Metric value as evaluated, reduced into its cycle.
    pub raw: f64,
    /// Continuous value: `raw` plus the accumulated whole cycles.
    pub value: f64,
}

/// Oldest-first buffer of at most 3 samples.
///
/// Pushing into a full window drops the oldest sample; the buffer never
/// grows past its capacity.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    buf: [Sample; 3],
    len: usize,
    capacity: usize,
}

const EMPTY: Sample = Sample {
    jd: 0.0,
    raw: 0.0,
    value: 0.0,
};

impl SampleWindow {
    /// A window holding `capacity` samples; clamped to 2..=3.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: [EMPTY; 3],
            len: 0,
            capacity: capacity.clamp(2, 3),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn push(&mut self, sample: Sample) {
        if self.len == self.capacity {
            self.buf.copy_within(1..self.capacity, 0);
            self.len -= 1;
        }
        self.buf[self.len] = sample;
        self.len += 1;
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<&Sample> {
        self.len.checked_sub(1).map(|i| &self.buf[i])
    }

    /// Sample just before the most recent one.
    pub fn previous(&self) -> Option<&Sample> {
        self.len.checked_sub(2).map(|i| &self.buf[i])
    }

    /// Sample two before the most recent one (3-sample windows only).
    pub fn older(&self) -> Option<&Sample> {
        self.len.checked_sub(3).map(|i| &self.buf[i])
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.buf[..self.len]
    }
}
