//! Crossing detection on the sliding sample window.
//!
//! Every new sample is stitched onto a continuous track (raw value plus
//! whole cycles), then the latest step of that track is checked against the
//! target set. Stitching is where the 0/360 seam, the modulus sawtooth and
//! the revolution counter of elapsed-degree searches are all handled.

use tracing::trace;

use crate::targets::TargetSet;
use crate::window::{Sample, SampleWindow};

/// How a raw metric is stitched across its cycle boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WrapRule {
    /// Unbounded signal, taken as-is.
    None,
    /// A jump larger than half the cycle is a wrap through the seam.
    HalfCycle(f64),
    /// Modulus sawtooth: a jump beyond the crossover margin (2/3 of the
    /// cycle) is a reset; a jump between 1/2 and 2/3 of the cycle is a reset
    /// only if it reverses the direction of the previous step.
    Crossover(f64),
}

impl WrapRule {
    pub fn cycle(self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::HalfCycle(m) | Self::Crossover(m) => Some(m),
        }
    }

    /// Minimum jump, in metric units, accepted as a reset without looking at
    /// the previous step.
    pub fn crossover_margin(self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::HalfCycle(m) => Some(0.5 * m),
            Self::Crossover(m) => Some(2.0 * m / 3.0),
        }
    }

    /// Whole-cycle correction for stepping from `prev_raw` to `curr_raw`.
    ///
    /// `prev_delta` is the previous step on the continuous track, in scan
    /// order, when one exists.
    pub fn cycle_shift(self, prev_raw: f64, curr_raw: f64, prev_delta: Option<f64>) -> i64 {
        let delta = curr_raw - prev_raw;
        let wrapped = match self {
            Self::None => false,
            Self::HalfCycle(m) => delta.abs() > 0.5 * m,
            Self::Crossover(m) => {
                let margin = 2.0 * m / 3.0;
                if delta.abs() > margin {
                    true
                } else if delta.abs() > 0.5 * m {
                    match prev_delta {
                        Some(p) if p != 0.0 => p.signum() != delta.signum(),
                        _ => true,
                    }
                } else {
                    false
                }
            }
        };
        if !wrapped {
            0
        } else if delta > 0.0 {
            -1
        } else {
            1
        }
    }
}

/// Chronological direction of the metric through a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    /// Below the target before, at or above it after.
    Rising,
    /// At or above the target before, below it after.
    Falling,
}

/// A step known to contain one crossing of one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Chronologically earlier sample.
    pub early: Sample,
    /// Chronologically later sample.
    pub late: Sample,
    /// Target as it appears on the continuous track.
    pub target_value: f64,
    /// Target as configured.
    pub target_deg: f64,
    pub motion: Motion,
}

/// Stitches samples onto a continuous track and reports crossings.
#[derive(Debug, Clone)]
pub struct CrossingDetector {
    window: SampleWindow,
    targets: TargetSet,
    wrap: WrapRule,
    revolutions: i64,
}

impl CrossingDetector {
    pub fn new(targets: TargetSet, wrap: WrapRule) -> Self {
        let capacity = match wrap {
            WrapRule::Crossover(_) => 3,
            _ => 2,
        };
        Self {
            window: SampleWindow::new(capacity),
            targets,
            wrap,
            revolutions: 0,
        }
    }

    /// Whole cycles accumulated since the first sample, in scan order.
    pub fn revolutions(&self) -> i64 {
        self.revolutions
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.window.latest()
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    /// Add the sample at `jd` and return the crossings in the newest step.
    pub fn observe(&mut self, jd: f64, raw: f64) -> Vec<Bracket> {
        let value = match (self.window.latest(), self.wrap.cycle()) {
            (Some(prev), Some(cycle)) => {
                let prev_delta = self.window.previous().map(|p| prev.value - p.value);
                self.revolutions += self.wrap.cycle_shift(prev.raw, raw, prev_delta);
                raw + self.revolutions as f64 * cycle
            }
            _ => raw,
        };
        self.window.push(Sample { jd, raw, value });
        self.detect()
    }

    fn detect(&self) -> Vec<Bracket> {
        let (Some(prev), Some(curr)) = (self.window.previous(), self.window.latest()) else {
            return Vec::new();
        };
        let (early, late) = if prev.jd <= curr.jd {
            (*prev, *curr)
        } else {
            (*curr, *prev)
        };

        let (lo, hi, motion) = if late.value > early.value {
            (early.value, late.value, Motion::Rising)
        } else if late.value < early.value {
            (late.value, early.value, Motion::Falling)
        } else {
            return Vec::new();
        };

        self.targets
            .crossed(lo, hi)
            .into_iter()
            .map(|(target_value, target_deg)| {
                trace!(
                    early_jd = early.jd,
                    late_jd = late.jd,
                    target_deg,
                    ?motion,
                    "crossing bracketed"
                );
                Bracket {
                    early,
                    late,
                    target_value,
                    target_deg,
                    motion,
                }
            })
            .collect()
    }
}
