//! Fixed-degree crossings: times when a longitude passes a fixed zodiac
//! point (ingresses, returns to a natal degree).

use crate::angle::normalize_360;
use crate::error::SearchError;
use crate::metric::{LongitudeSource, Metric};
use crate::oracle::AngleOracle;
use crate::search_types::{CrossingEvent, SearchConfig};
use crate::search_util::scan_window;
use crate::targets::TargetSet;

/// All times in `[jd_start, jd_end]` when `source` passes `fixed_deg`,
/// moving in either direction.
///
/// `fixed_deg` is normalized first, so 360 and 0 name the same point.
/// Reported events carry the normalized degree.
pub fn find_fixed_degree_crossings<O: AngleOracle + ?Sized>(
    oracle: &O,
    source: impl Into<LongitudeSource>,
    fixed_deg: f64,
    jd_start: f64,
    jd_end: f64,
    config: &SearchConfig,
) -> Result<Vec<CrossingEvent>, SearchError> {
    if !fixed_deg.is_finite() {
        return Err(SearchError::InvalidInput(format!(
            "fixed degree must be finite, got {fixed_deg}"
        )));
    }
    let point_deg = normalize_360(fixed_deg);
    let metric = Metric::FixedOffset {
        source: source.into(),
        point_deg,
    };
    let mut events = scan_window(
        oracle,
        &metric,
        TargetSet::fixed_degree(0.0)?,
        jd_start,
        jd_end,
        config,
    )?;
    for e in &mut events {
        e.target_deg = point_deg;
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::Motion;
    use crate::metric::AveragePolicy;
    use crate::oracle::{AngleSample, Body, BodySpec, OracleError};

    /// Mars swings around 0 deg: lon = 5 * sin(2 pi jd / 20).
    struct Swing;

    impl AngleOracle for Swing {
        fn sample(&self, spec: &BodySpec, jd: f64) -> Result<AngleSample, OracleError> {
            let w = std::f64::consts::TAU / 20.0;
            let (lon, speed) = match spec.body {
                Body::Mars => (5.0 * (w * jd).sin(), 5.0 * w * (w * jd).cos()),
                Body::Venus => (350.0, 0.0),
                Body::Jupiter => (30.0, 0.0),
                _ => return Err(OracleError::Unsupported(*spec)),
            };
            Ok(AngleSample {
                longitude_deg: lon.rem_euclid(360.0),
                longitude_speed_deg_per_day: speed,
            })
        }
    }

    const MARS: BodySpec = BodySpec::geocentric(Body::Mars);

    #[test]
    fn zero_and_360_are_the_same_point() {
        let cfg = SearchConfig::precise();
        let a = find_fixed_degree_crossings(&Swing, MARS, 0.0, 1.0, 39.0, &cfg).expect("search");
        let b = find_fixed_degree_crossings(&Swing, MARS, 360.0, 1.0, 39.0, &cfg).expect("search");
        // Zeros of the sine at 10, 20 and 30.
        assert_eq!(a.len(), 3);
        assert_eq!(a, b);
        for (e, want) in a.iter().zip([10.0, 20.0, 30.0]) {
            assert!((e.jd - want).abs() < 2.0 / 86_400.0);
            assert!(e.target_deg.abs() < 1e-12);
        }
        assert_eq!(a[0].motion, Motion::Falling);
        assert_eq!(a[1].motion, Motion::Rising);
    }

    #[test]
    fn off_seam_point() {
        let cfg = SearchConfig::precise();
        let events = find_fixed_degree_crossings(&Swing, MARS, 2.5, 0.0, 20.0, &cfg).expect("search");
        // 5 sin(w t) = 2.5 at t = 20/12 and t = 20 * 5/12.
        assert_eq!(events.len(), 2);
        assert!((events[0].jd - 20.0 / 12.0).abs() < 2.0 / 86_400.0);
        assert!((events[1].jd - 100.0 / 12.0).abs() < 2.0 / 86_400.0);
        assert!((events[0].target_deg - 2.5).abs() < 1e-12);
    }

    #[test]
    fn averaged_source() {
        // Mean of 350 and 30 is 190 raw, 10 with seam unwrapping.
        let src = LongitudeSource::averaged(vec![
            BodySpec::geocentric(Body::Venus),
            BodySpec::geocentric(Body::Jupiter),
        ])
        .expect("non-empty");
        let cfg = SearchConfig::precise().with_average_policy(AveragePolicy::Unwrapped);
        let lon = src
            .longitude(&Swing, 0.0, cfg.average_policy)
            .expect("sample");
        assert!((lon - 10.0).abs() < 1e-9);
        let events = find_fixed_degree_crossings(&Swing, src, 10.0, 0.0, 5.0, &cfg).expect("search");
        assert!(events.is_empty());
    }

    #[test]
    fn non_finite_degree_rejected() {
        let cfg = SearchConfig::precise();
        let err = find_fixed_degree_crossings(&Swing, MARS, f64::NAN, 0.0, 1.0, &cfg).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn non_positive_error_rejected() {
        let cfg = SearchConfig::precise().with_max_error_days(0.0);
        let err = find_fixed_degree_crossings(&Swing, MARS, 0.0, 0.0, 1.0, &cfg).unwrap_err();
        assert!(matches!(err, SearchError::InvalidConfig(_)));
    }
}
