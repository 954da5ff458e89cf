//! Aspect search: times when the separation of two longitudes reaches a
//! target angle.
//!
//! The separation is `normalize(lon(a) - lon(b))`, so a target `d` and its
//! complement `360 - d` are different events (b ahead of a versus a ahead
//! of b). Both are searched unless the config is uni-directional.

use crate::error::SearchError;
use crate::metric::{LongitudeSource, Metric};
use crate::oracle::AngleOracle;
use crate::search_types::{AspectConfig, CrossingEvent, SearchConfig, SearchDirection};
use crate::search_util::{scan_first, scan_window};
use crate::targets::TargetSet;

fn aspect_setup(
    a: LongitudeSource,
    b: LongitudeSource,
    aspect: &AspectConfig,
) -> Result<(Metric, TargetSet), SearchError> {
    aspect.validate().map_err(SearchError::InvalidConfig)?;
    let targets = TargetSet::aspect(aspect.target_deg, aspect.uni_directional)?;
    Ok((Metric::Difference { a, b }, targets))
}

/// All times in `[jd_start, jd_end]` when `lon(a) - lon(b)` reaches the
/// configured separation.
pub fn find_angular_aspects<O: AngleOracle + ?Sized>(
    oracle: &O,
    a: impl Into<LongitudeSource>,
    b: impl Into<LongitudeSource>,
    aspect: &AspectConfig,
    jd_start: f64,
    jd_end: f64,
    config: &SearchConfig,
) -> Result<Vec<CrossingEvent>, SearchError> {
    let (metric, targets) = aspect_setup(a.into(), b.into(), aspect)?;
    scan_window(oracle, &metric, targets, jd_start, jd_end, config)
}

/// All times in `[jd_start, jd_end]` when the separation, taken modulo
/// `modulus`, reaches `aspect.target_deg`.
///
/// With `modulus = 30` and `target_deg = 0` this finds every multiple of
/// 30 deg (the semi-sextile family). The target is reduced into
/// `[0, modulus)`. A modulus that does not divide 360 is rejected with
/// [`SearchError::InvalidInput`].
pub fn find_modulo_aspects<O: AngleOracle + ?Sized>(
    oracle: &O,
    a: impl Into<LongitudeSource>,
    b: impl Into<LongitudeSource>,
    modulus: f64,
    aspect: &AspectConfig,
    jd_start: f64,
    jd_end: f64,
    config: &SearchConfig,
) -> Result<Vec<CrossingEvent>, SearchError> {
    aspect.validate().map_err(SearchError::InvalidConfig)?;
    let targets = TargetSet::modulo(aspect.target_deg, modulus, aspect.uni_directional)?;
    let metric = Metric::ModuloMultiple {
        a: a.into(),
        b: b.into(),
        modulus,
    };
    scan_window(oracle, &metric, targets, jd_start, jd_end, config)
}

/// Next aspect after `jd`, looking at most `config.max_scan_days` ahead.
pub fn next_angular_aspect<O: AngleOracle + ?Sized>(
    oracle: &O,
    a: impl Into<LongitudeSource>,
    b: impl Into<LongitudeSource>,
    aspect: &AspectConfig,
    jd: f64,
    config: &SearchConfig,
) -> Result<Option<CrossingEvent>, SearchError> {
    let (metric, targets) = aspect_setup(a.into(), b.into(), aspect)?;
    scan_first(oracle, &metric, targets, jd, SearchDirection::Forward, config)
}

/// Previous aspect before `jd`, looking at most `config.max_scan_days` back.
pub fn prev_angular_aspect<O: AngleOracle + ?Sized>(
    oracle: &O,
    a: impl Into<LongitudeSource>,
    b: impl Into<LongitudeSource>,
    aspect: &AspectConfig,
    jd: f64,
    config: &SearchConfig,
) -> Result<Option<CrossingEvent>, SearchError> {
    let (metric, targets) = aspect_setup(a.into(), b.into(), aspect)?;
    scan_first(oracle, &metric, targets, jd, SearchDirection::Backward, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::Motion;
    use crate::oracle::{AngleSample, Body, BodySpec, OracleError};

    /// Moon at 13 deg/day, Sun at 1 deg/day, both from 0 at jd 0.
    struct Lunation;

    impl AngleOracle for Lunation {
        fn sample(&self, spec: &BodySpec, jd: f64) -> Result<AngleSample, OracleError> {
            let speed = match spec.body {
                Body::Moon => 13.0,
                Body::Sun => 1.0,
                _ => return Err(OracleError::Unsupported(*spec)),
            };
            Ok(AngleSample {
                longitude_deg: (speed * jd).rem_euclid(360.0),
                longitude_speed_deg_per_day: speed,
            })
        }

        fn supports(&self, spec: &BodySpec) -> bool {
            matches!(spec.body, Body::Moon | Body::Sun)
        }
    }

    const MOON: BodySpec = BodySpec::geocentric(Body::Moon);
    const SUN: BodySpec = BodySpec::geocentric(Body::Sun);

    #[test]
    fn quarters_both_ways() {
        // Separation grows 12 deg/day: 90 at 7.5, 270 at 22.5, 450 at 37.5.
        let events = find_angular_aspects(
            &Lunation,
            MOON,
            SUN,
            &AspectConfig::aspect(90.0),
            1.0,
            40.0,
            &SearchConfig::precise(),
        )
        .expect("search");
        let jds: Vec<f64> = events.iter().map(|e| e.jd).collect();
        assert_eq!(jds.len(), 3);
        for (got, want) in jds.iter().zip([7.5, 22.5, 37.5]) {
            assert!((got - want).abs() < 2.0 / 86_400.0, "{got} vs {want}");
        }
        assert!(events.iter().all(|e| e.motion == Motion::Rising));
        assert!((events[1].target_deg - 270.0).abs() < 1e-12);
    }

    #[test]
    fn uni_directional_skips_complement() {
        let events = find_angular_aspects(
            &Lunation,
            MOON,
            SUN,
            &AspectConfig::uni(90.0),
            1.0,
            40.0,
            &SearchConfig::precise(),
        )
        .expect("search");
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn conjunction_at_the_seam() {
        let events = find_angular_aspects(
            &Lunation,
            MOON,
            SUN,
            &AspectConfig::conjunction(),
            1.0,
            40.0,
            &SearchConfig::precise(),
        )
        .expect("search");
        assert_eq!(events.len(), 1);
        assert!((events[0].jd - 30.0).abs() < 2.0 / 86_400.0);
        assert!(events[0].target_deg.abs() < 1e-12);
    }

    #[test]
    fn modulo_thirty() {
        // 12 deg/day from 12 to 132: 30, 60, 90, 120 at 2.5, 5, 7.5, 10.
        let events = find_modulo_aspects(
            &Lunation,
            MOON,
            SUN,
            30.0,
            &AspectConfig::uni(0.0),
            1.0,
            11.0,
            &SearchConfig::precise(),
        )
        .expect("search");
        assert_eq!(events.len(), 4);
        assert!((events[0].jd - 2.5).abs() < 2.0 / 86_400.0);
    }

    #[test]
    fn next_and_prev() {
        let cfg = SearchConfig::precise();
        let next = next_angular_aspect(&Lunation, MOON, SUN, &AspectConfig::opposition(), 20.0, &cfg)
            .expect("search")
            .expect("found");
        assert!((next.jd - 45.0).abs() < 2.0 / 86_400.0);
        let prev = prev_angular_aspect(&Lunation, MOON, SUN, &AspectConfig::opposition(), 20.0, &cfg)
            .expect("search")
            .expect("found");
        assert!((prev.jd - 15.0).abs() < 2.0 / 86_400.0);
    }

    #[test]
    fn rejects_reversed_window() {
        let err = find_angular_aspects(
            &Lunation,
            MOON,
            SUN,
            &AspectConfig::conjunction(),
            10.0,
            5.0,
            &SearchConfig::precise(),
        )
        .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn rejects_unsupported_body() {
        let err = find_angular_aspects(
            &Lunation,
            MOON,
            BodySpec::geocentric(Body::Mars),
            &AspectConfig::conjunction(),
            0.0,
            5.0,
            &SearchConfig::precise(),
        )
        .unwrap_err();
        assert_eq!(err, SearchError::UnsupportedBody(BodySpec::geocentric(Body::Mars)));
    }

    #[test]
    fn empty_window_is_empty() {
        let events = find_angular_aspects(
            &Lunation,
            MOON,
            SUN,
            &AspectConfig::conjunction(),
            5.0,
            5.0,
            &SearchConfig::precise(),
        )
        .expect("search");
        assert!(events.is_empty());
    }
}
