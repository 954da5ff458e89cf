//! Configuration and result types shared by the search entry points.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::detector::Motion;
use crate::metric::AveragePolicy;
use crate::step_policy::StepPolicy;
use crate::time::{SECONDS_PER_DAY, hours_to_days};

/// Scan direction in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

impl SearchDirection {
    /// +1 for forward, -1 for backward.
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Cooperative cancellation flag, checked once per scan step.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Tolerances and limits for one search call.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Bisection stops once the bracket is at most this wide (days).
    pub max_error_days: f64,
    /// Upper bound on bisection iterations per crossing.
    pub max_iterations: u32,
    /// Span covered by open-ended next/prev searches (days).
    pub max_scan_days: f64,
    /// Span covered by elapsed-degree searches before giving up (days).
    pub elapsed_scan_days: f64,
    pub step_policy: StepPolicy,
    pub average_policy: AveragePolicy,
    pub cancel: Option<CancelToken>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::precise()
    }
}

impl SearchConfig {
    /// One-second precision, the usual setting for single events.
    pub fn precise() -> Self {
        Self {
            max_error_days: 1.0 / SECONDS_PER_DAY,
            max_iterations: 64,
            max_scan_days: 800.0,
            elapsed_scan_days: 100.0 * 365.25,
            step_policy: StepPolicy::default(),
            average_policy: AveragePolicy::Raw,
            cancel: None,
        }
    }

    /// One-hour precision for long survey scans.
    pub fn survey() -> Self {
        Self {
            max_error_days: hours_to_days(1.0),
            ..Self::precise()
        }
    }

    pub fn with_max_error_days(mut self, days: f64) -> Self {
        self.max_error_days = days;
        self
    }

    pub fn with_max_error_seconds(self, seconds: f64) -> Self {
        self.with_max_error_days(seconds / SECONDS_PER_DAY)
    }

    pub fn with_step_policy(mut self, policy: StepPolicy) -> Self {
        self.step_policy = policy;
        self
    }

    pub fn with_average_policy(mut self, policy: AveragePolicy) -> Self {
        self.average_policy = policy;
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_max_scan_days(mut self, days: f64) -> Self {
        self.max_scan_days = days;
        self
    }

    pub fn with_elapsed_scan_days(mut self, days: f64) -> Self {
        self.elapsed_scan_days = days;
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.max_error_days.is_finite() || self.max_error_days <= 0.0 {
            return Err("max_error_days must be positive");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.max_scan_days.is_finite() || self.max_scan_days <= 0.0 {
            return Err("max_scan_days must be positive");
        }
        if !self.elapsed_scan_days.is_finite() || self.elapsed_scan_days <= 0.0 {
            return Err("elapsed_scan_days must be positive");
        }
        self.step_policy.validate()
    }
}

/// Which separation an aspect search looks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectConfig {
    /// Target separation `lon(a) - lon(b)` in degrees.
    pub target_deg: f64,
    /// Only `target_deg`, not its complement `360 - target_deg`.
    pub uni_directional: bool,
}

impl AspectConfig {
    /// Both `target_deg` and `360 - target_deg`.
    pub fn aspect(target_deg: f64) -> Self {
        Self {
            target_deg,
            uni_directional: false,
        }
    }

    /// Only `target_deg`.
    pub fn uni(target_deg: f64) -> Self {
        Self {
            target_deg,
            uni_directional: true,
        }
    }

    pub fn conjunction() -> Self {
        Self::aspect(0.0)
    }

    pub fn opposition() -> Self {
        Self::aspect(180.0)
    }

    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.target_deg.is_finite() {
            return Err("target_deg must be finite");
        }
        if !(0.0..=360.0).contains(&self.target_deg) {
            return Err("target_deg must be in [0, 360]");
        }
        Ok(())
    }
}

/// One refined crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingEvent {
    /// Event time as Julian Date, within `max_error_days` of the crossing.
    pub jd: f64,
    /// The target value that was crossed, as configured.
    pub target_deg: f64,
    /// Direction of the metric through the target, in time order.
    pub motion: Motion,
}

/// Station type: retrograde or direct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationType {
    /// Longitude speed crosses from non-negative to negative.
    StationRetrograde,
    /// Longitude speed crosses from negative to non-negative.
    StationDirect,
}

impl StationType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::StationRetrograde => "retrograde",
            Self::StationDirect => "direct",
        }
    }
}

/// A stationary point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationEvent {
    /// Event time as Julian Date.
    pub jd: f64,
    /// Longitude at the station in degrees [0, 360).
    pub longitude_deg: f64,
    pub station_type: StationType,
}

/// Why an elapsed-degree search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// First crossing found and the body cannot come back.
    DirectOnly,
    /// The body moved more than 120 deg beyond the target; no retrograde
    /// loop can bring it back.
    PassedTarget,
    /// The body is provably moving away from a target it never reached.
    Diverged,
    /// The configured scan span ran out.
    ScanLimit,
}

/// Result of an elapsed-degree search.
#[derive(Debug, Clone, PartialEq)]
pub struct ElapsedOutcome {
    /// Crossing times in chronological order.
    pub crossings: Vec<f64>,
    pub termination: Termination,
}

impl ElapsedOutcome {
    /// No crossing was found before the search stopped.
    pub fn is_exhausted(&self) -> bool {
        self.crossings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precise_defaults() {
        let c = SearchConfig::precise();
        assert!((c.max_error_days * SECONDS_PER_DAY - 1.0).abs() < 1e-9);
        assert_eq!(c.max_iterations, 64);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn survey_is_one_hour() {
        let c = SearchConfig::survey();
        assert!((c.max_error_days * 24.0 - 1.0).abs() < 1e-12);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_error() {
        assert!(SearchConfig::precise().with_max_error_days(0.0).validate().is_err());
        assert!(SearchConfig::precise().with_max_error_days(-1.0).validate().is_err());
        assert!(
            SearchConfig::precise()
                .with_max_error_days(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn rejects_zero_iterations() {
        let mut c = SearchConfig::precise();
        c.max_iterations = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn aspect_constructors() {
        assert!((AspectConfig::conjunction().target_deg - 0.0).abs() < 1e-15);
        assert!((AspectConfig::opposition().target_deg - 180.0).abs() < 1e-15);
        assert!(AspectConfig::uni(5.0).uni_directional);
        assert!(!AspectConfig::aspect(90.0).uni_directional);
    }

    #[test]
    fn aspect_rejects_out_of_range() {
        assert!(AspectConfig::aspect(-10.0).validate().is_err());
        assert!(AspectConfig::aspect(400.0).validate().is_err());
        assert!(AspectConfig::aspect(360.0).validate().is_ok());
    }

    #[test]
    fn cancel_token_shared() {
        let t = CancelToken::new();
        let c = SearchConfig::precise().with_cancel(t.clone());
        assert!(!c.is_cancelled());
        t.cancel();
        assert!(c.is_cancelled());
    }

    #[test]
    fn station_labels() {
        assert_eq!(StationType::StationDirect.label(), "direct");
        assert_eq!(StationType::StationRetrograde.label(), "retrograde");
    }
}
