//! Bisection refinement of a bracketed crossing.
//!
//! The bracket comes from the detector with both ends already on the
//! continuous track. Each midpoint sample is moved onto the same track by
//! picking the turn closest to the bracket's own values, so the comparison
//! against the target stays meaningful even when the bracket straddles a
//! seam.

use tracing::trace;

use crate::angle::unwrap_near;
use crate::detector::{Bracket, Motion};
use crate::error::SearchError;
use crate::metric::{AveragePolicy, Metric};
use crate::oracle::AngleOracle;

/// Refines brackets of one metric to a fixed time tolerance.
pub struct BisectionRefiner<'a, O: AngleOracle + ?Sized> {
    oracle: &'a O,
    metric: &'a Metric,
    policy: AveragePolicy,
    max_error_days: f64,
    max_iterations: u32,
}

impl<'a, O: AngleOracle + ?Sized> BisectionRefiner<'a, O> {
    pub fn new(
        oracle: &'a O,
        metric: &'a Metric,
        policy: AveragePolicy,
        max_error_days: f64,
        max_iterations: u32,
    ) -> Self {
        Self {
            oracle,
            metric,
            policy,
            max_error_days,
            max_iterations,
        }
    }

    /// Metric value at `jd` on the track around `reference`.
    fn value_near(&self, jd: f64, reference: f64) -> Result<f64, SearchError> {
        let raw = self.metric.evaluate(self.oracle, jd, self.policy)?;
        Ok(match self.metric.modulus() {
            Some(cycle) => unwrap_near(raw, reference, cycle),
            None => raw,
        })
    }

    /// Time of the crossing inside `bracket`.
    ///
    /// The returned instant lies on the "after" side of the target and no
    /// further than `max_error_days` from the true crossing, unless the
    /// iteration cap or floating-point resolution stops the bisection first.
    pub fn refine(&self, bracket: &Bracket) -> Result<f64, SearchError> {
        let mut t1 = bracket.early.jd;
        let mut t2 = bracket.late.jd;
        let reference = 0.5 * (bracket.early.value + bracket.late.value);
        let target = bracket.target_value;

        let mut iterations = 0;
        while t2 - t1 > self.max_error_days && iterations < self.max_iterations {
            let mid = 0.5 * (t1 + t2);
            if mid <= t1 || mid >= t2 {
                break;
            }
            let v = self.value_near(mid, reference)?;
            let before = match bracket.motion {
                Motion::Rising => v < target,
                Motion::Falling => v >= target,
            };
            if before {
                t1 = mid;
            } else {
                t2 = mid;
            }
            iterations += 1;
        }

        trace!(jd = t2, width = t2 - t1, iterations, "crossing refined");
        Ok(t2)
    }
}
