//! Scan step sizes.
//!
//! The whole search rests on one assumption: between two consecutive
//! samples the tracked metric moves well under a third of its cycle, so a
//! jump larger than that can only be a wrap. The step table encodes that
//! assumption per body: `max speed * step < 120 deg`, with a wide margin.

use crate::angle::FULL_TURN_DEG;
use crate::metric::Metric;
use crate::oracle::{AngleOracle, Body, BodySpec, Centricity};

/// Default step in days when no table entry applies.
pub const DEFAULT_STEP_DAYS: f64 = 1.0;

const HOUR: f64 = 1.0 / 24.0;
const YEAR: f64 = 365.25;

/// Static step table in days.
///
/// Angles sweep ~360 deg a day (far more at high latitudes), so they get an
/// hour. Slow heliocentric orbits get multi-year steps: Pluto moves under
/// 0.01 deg/day even at perihelion.
pub fn table_step_days(body: Body, centricity: Centricity) -> Option<f64> {
    match (body, centricity) {
        (Body::Ascendant | Body::Midheaven, _) => Some(HOUR),
        (_, Centricity::Heliocentric) => match body {
            Body::Venus => Some(3.0),
            Body::Earth => Some(5.0),
            Body::Mars => Some(10.0),
            Body::Jupiter => Some(YEAR),
            Body::Saturn => Some(2.0 * YEAR),
            Body::Uranus => Some(5.0 * YEAR),
            Body::Neptune | Body::Pluto => Some(10.0 * YEAR),
            _ => None,
        },
        _ => None,
    }
}

/// Step lookup with optional per-(body, centricity) overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPolicy {
    default_days: f64,
    overrides: Vec<(Body, Centricity, f64)>,
}

impl Default for StepPolicy {
    fn default() -> Self {
        Self {
            default_days: DEFAULT_STEP_DAYS,
            overrides: Vec::new(),
        }
    }
}

impl StepPolicy {
    /// Replace the fallback step used when the table has no entry.
    pub fn with_default_days(mut self, days: f64) -> Self {
        self.default_days = days;
        self
    }

    /// Force the step for one body and centricity.
    pub fn with_override(mut self, body: Body, centricity: Centricity, days: f64) -> Self {
        self.overrides
            .retain(|&(b, c, _)| !(b == body && c == centricity));
        self.overrides.push((body, centricity, days));
        self
    }

    pub fn default_days(&self) -> f64 {
        self.default_days
    }

    /// Step in days for one body specification.
    pub fn step_for(&self, spec: &BodySpec) -> f64 {
        self.overrides
            .iter()
            .find(|&&(b, c, _)| b == spec.body && c == spec.centricity)
            .map(|&(_, _, days)| days)
            .or_else(|| table_step_days(spec.body, spec.centricity))
            .unwrap_or(self.default_days)
    }

    /// Step for a metric: the smallest step among the sampled bodies, with
    /// the oracle's hint taking precedence over the table.
    ///
    /// Modulo metrics cycle every `modulus` degrees instead of 360, so the
    /// step shrinks in proportion.
    pub fn step_for_metric<O: AngleOracle + ?Sized>(&self, oracle: &O, metric: &Metric) -> f64 {
        let base = metric
            .body_specs()
            .iter()
            .map(|spec| {
                oracle
                    .step_size_hint(spec)
                    .filter(|d| d.is_finite() && *d > 0.0)
                    .unwrap_or_else(|| self.step_for(spec))
            })
            .fold(f64::INFINITY, f64::min);
        let base = if base.is_finite() {
            base
        } else {
            self.default_days
        };
        match metric {
            Metric::ModuloMultiple { modulus, .. } => base * (modulus / FULL_TURN_DEG).min(1.0),
            _ => base,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.default_days.is_finite() || self.default_days <= 0.0 {
            return Err("default step must be positive");
        }
        if self
            .overrides
            .iter()
            .any(|&(_, _, d)| !d.is_finite() || d <= 0.0)
        {
            return Err("step overrides must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::LongitudeSource;
    use crate::oracle::{AngleSample, OracleError};

    struct NoHints;

    impl AngleOracle for NoHints {
        fn sample(&self, _spec: &BodySpec, _jd: f64) -> Result<AngleSample, OracleError> {
            Ok(AngleSample {
                longitude_deg: 0.0,
                longitude_speed_deg_per_day: 0.0,
            })
        }
    }

    struct Hinted;

    impl AngleOracle for Hinted {
        fn sample(&self, _spec: &BodySpec, _jd: f64) -> Result<AngleSample, OracleError> {
            Ok(AngleSample {
                longitude_deg: 0.0,
                longitude_speed_deg_per_day: 0.0,
            })
        }

        fn step_size_hint(&self, spec: &BodySpec) -> Option<f64> {
            (spec.body == Body::Moon).then_some(0.25)
        }
    }

    #[test]
    fn default_is_one_day() {
        let p = StepPolicy::default();
        assert!((p.step_for(&BodySpec::geocentric(Body::Mercury)) - 1.0).abs() < 1e-15);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn angles_use_hours() {
        let p = StepPolicy::default();
        let s = p.step_for(&BodySpec::geocentric(Body::Ascendant));
        assert!((s - 1.0 / 24.0).abs() < 1e-15);
    }

    #[test]
    fn slow_heliocentric_use_years() {
        let p = StepPolicy::default();
        assert!(p.step_for(&BodySpec::heliocentric(Body::Neptune)) > 3000.0);
        assert!(p.step_for(&BodySpec::heliocentric(Body::Saturn)) > 700.0);
    }

    #[test]
    fn table_respects_velocity_margin() {
        // Rough upper bounds of heliocentric speed in deg/day.
        let max_speed = [
            (Body::Venus, 1.7),
            (Body::Earth, 1.1),
            (Body::Mars, 0.7),
            (Body::Jupiter, 0.1),
            (Body::Saturn, 0.04),
            (Body::Uranus, 0.013),
            (Body::Neptune, 0.0065),
            (Body::Pluto, 0.007),
        ];
        for (body, v) in max_speed {
            let step = table_step_days(body, Centricity::Heliocentric).expect("table entry");
            assert!(v * step < 120.0, "{body}: {v} * {step}");
        }
    }

    #[test]
    fn override_wins() {
        let p = StepPolicy::default().with_override(Body::Moon, Centricity::Geocentric, 0.5);
        assert!((p.step_for(&BodySpec::geocentric(Body::Moon)) - 0.5).abs() < 1e-15);
        assert!((p.step_for(&BodySpec::topocentric(Body::Moon)) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn metric_takes_smallest_member() {
        let p = StepPolicy::default();
        let m = Metric::Difference {
            a: LongitudeSource::single(BodySpec::heliocentric(Body::Jupiter)),
            b: LongitudeSource::single(BodySpec::heliocentric(Body::Mars)),
        };
        assert!((p.step_for_metric(&NoHints, &m) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn modulo_metric_shrinks_step() {
        let p = StepPolicy::default();
        let m = Metric::ModuloMultiple {
            a: LongitudeSource::single(BodySpec::geocentric(Body::Moon)),
            b: LongitudeSource::single(BodySpec::geocentric(Body::Sun)),
            modulus: 30.0,
        };
        assert!((p.step_for_metric(&NoHints, &m) - 1.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn oracle_hint_overrides_table() {
        let p = StepPolicy::default();
        let m = Metric::VelocitySign(BodySpec::geocentric(Body::Moon));
        assert!((p.step_for_metric(&Hinted, &m) - 0.25).abs() < 1e-15);
    }

    #[test]
    fn rejects_bad_steps() {
        assert!(StepPolicy::default().with_default_days(0.0).validate().is_err());
        let p = StepPolicy::default().with_override(Body::Sun, Centricity::Geocentric, -1.0);
        assert!(p.validate().is_err());
    }
}
