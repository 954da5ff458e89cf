//! Fixed-step scanning driver.
//!
//! A [`Scanner`] walks from a start instant toward a limit, one step per
//! call to [`Scanner::advance`]. Each step samples the metric once, feeds the
//! detector and refines whatever crossings the step bracketed. The last step
//! is shortened so the limit itself is always sampled.

use std::collections::VecDeque;

use tracing::debug;

use crate::detector::CrossingDetector;
use crate::error::SearchError;
use crate::metric::Metric;
use crate::oracle::AngleOracle;
use crate::refine::BisectionRefiner;
use crate::search_types::{CrossingEvent, SearchConfig, SearchDirection};
use crate::targets::TargetSet;
use crate::window::Sample;

/// Lazy, finite scan over `[start, limit]` (or `[limit, start]` backward).
///
/// As an iterator it yields one crossing at a time, in scan order.
pub struct Scanner<'a, O: AngleOracle + ?Sized> {
    oracle: &'a O,
    metric: &'a Metric,
    config: &'a SearchConfig,
    detector: CrossingDetector,
    refiner: BisectionRefiner<'a, O>,
    /// Next instant to sample.
    cursor: f64,
    limit: f64,
    /// Signed step in days.
    step: f64,
    finished: bool,
    /// Crossings found by the iterator but not yet yielded.
    pending: VecDeque<CrossingEvent>,
}

impl<'a, O: AngleOracle + ?Sized> Scanner<'a, O> {
    /// Set up a scan. Nothing is sampled until the first `advance`.
    ///
    /// `limit` must lie on the `direction` side of `start`; a limit behind
    /// the start is treated as equal to it.
    pub fn new(
        oracle: &'a O,
        metric: &'a Metric,
        targets: TargetSet,
        config: &'a SearchConfig,
        start: f64,
        limit: f64,
        direction: SearchDirection,
    ) -> Self {
        let step = config.step_policy.step_for_metric(oracle, metric) * direction.sign();
        let limit = match direction {
            SearchDirection::Forward => limit.max(start),
            SearchDirection::Backward => limit.min(start),
        };
        debug!(start, limit, step, ?direction, "scan started");
        Self {
            oracle,
            metric,
            config,
            detector: CrossingDetector::new(targets, metric.wrap_rule()),
            refiner: BisectionRefiner::new(
                oracle,
                metric,
                config.average_policy,
                config.max_error_days,
                config.max_iterations,
            ),
            cursor: start,
            limit,
            step,
            finished: false,
            pending: VecDeque::new(),
        }
    }

    /// Signed step in days.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Most recent sample, on the continuous track.
    pub fn latest(&self) -> Option<&Sample> {
        self.detector.latest()
    }

    /// Whole cycles accumulated since the first sample.
    pub fn revolutions(&self) -> i64 {
        self.detector.revolutions()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Take one step.
    ///
    /// Returns the refined crossings of that step in chronological order,
    /// or `None` once the limit has been sampled.
    pub fn advance(&mut self) -> Result<Option<Vec<CrossingEvent>>, SearchError> {
        if self.finished {
            return Ok(None);
        }
        if self.config.is_cancelled() {
            self.finished = true;
            return Err(SearchError::Cancelled);
        }

        let jd = self.cursor;
        let raw = match self.metric.evaluate(self.oracle, jd, self.config.average_policy) {
            Ok(v) => v,
            Err(e) => {
                self.finished = true;
                return Err(e);
            }
        };

        let brackets = self.detector.observe(jd, raw);
        let mut events = Vec::with_capacity(brackets.len());
        for bracket in &brackets {
            match self.refiner.refine(bracket) {
                Ok(t) => events.push(CrossingEvent {
                    jd: t,
                    target_deg: bracket.target_deg,
                    motion: bracket.motion,
                }),
                Err(e) => {
                    self.finished = true;
                    return Err(e);
                }
            }
        }
        events.sort_by(|a, b| a.jd.total_cmp(&b.jd));

        if jd == self.limit {
            self.finished = true;
        } else {
            let next = jd + self.step;
            self.cursor = if self.step > 0.0 {
                next.min(self.limit)
            } else {
                next.max(self.limit)
            };
            // Steps too small to move the cursor would never reach the limit.
            if self.cursor == jd {
                self.cursor = self.limit;
            }
        }
        Ok(Some(events))
    }

    /// Run the scan to the limit and collect every crossing, chronologically.
    pub fn collect_events(mut self) -> Result<Vec<CrossingEvent>, SearchError> {
        let mut out = Vec::new();
        while let Some(events) = self.advance()? {
            out.extend(events);
        }
        out.sort_by(|a, b| a.jd.total_cmp(&b.jd));
        Ok(out)
    }
}

impl<O: AngleOracle + ?Sized> Iterator for Scanner<'_, O> {
    type Item = Result<CrossingEvent, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            match self.advance() {
                Ok(Some(mut events)) => {
                    if self.step < 0.0 {
                        events.reverse();
                    }
                    self.pending.extend(events);
                }
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
