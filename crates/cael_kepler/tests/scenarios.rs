//! Real-sky scenarios against the mean-element oracle.
//!
//! Reference instants are published UT times; tolerances cover the
//! accuracy of the analytic theories, not the search.

use cael_kepler::{GeoLocation, KeplerConfig, KeplerOracle};
use cael_search::{
    AngleOracle, AspectConfig, Body, BodySpec, SearchConfig, SearchDirection, SearchError,
    StationType, Termination, calendar_to_jd, find_angular_aspects,
    find_elapsed_degree_timestamps, find_fixed_degree_crossings, find_station_points,
    next_angular_aspect, next_station, normalize_360,
};

fn oracle() -> KeplerOracle {
    KeplerOracle::new(KeplerConfig::default()).expect("default config")
}

fn jd(year: i32, month: u32, day: u32, hours: f64) -> f64 {
    calendar_to_jd(year, month, f64::from(day) + hours / 24.0)
}

const SUN: BodySpec = BodySpec::geocentric(Body::Sun);
const MOON: BodySpec = BodySpec::geocentric(Body::Moon);
const MERCURY: BodySpec = BodySpec::geocentric(Body::Mercury);
const MARS: BodySpec = BodySpec::geocentric(Body::Mars);

#[test]
fn mercury_sun_elongation_over_fifteen_years() {
    let o = oracle();
    let start = jd(2010, 1, 1, 0.0);
    let events = find_angular_aspects(
        &o,
        MERCURY,
        SUN,
        &AspectConfig::uni(5.0),
        start,
        start + 15.0 * 365.25,
        &SearchConfig::precise(),
    )
    .expect("search");
    // Two passes of +5 deg per synodic period of ~116 days.
    assert!((90..=97).contains(&events.len()), "{}", events.len());
    assert!(events.windows(2).all(|w| w[1].jd - w[0].jd >= 1.0));
    assert!(events.iter().all(|e| e.target_deg == 5.0));
}

#[test]
fn mercury_stations_2024() {
    let o = oracle();
    let stations = find_station_points(
        &o,
        MERCURY,
        jd(2024, 2, 1, 0.0),
        jd(2025, 1, 31, 0.0),
        &SearchConfig::precise(),
    )
    .expect("search");
    let expected = [
        jd(2024, 4, 1, 22.2),
        jd(2024, 4, 25, 12.9),
        jd(2024, 8, 5, 4.9),
        jd(2024, 8, 28, 21.2),
        jd(2024, 11, 26, 2.7),
        jd(2024, 12, 15, 20.9),
    ];
    assert_eq!(stations.len(), expected.len());
    for (i, (s, want)) in stations.iter().zip(expected).enumerate() {
        assert!((s.jd - want).abs() < 2.0, "station {i}: {} vs {want}", s.jd);
        let kind = if i % 2 == 0 {
            StationType::StationRetrograde
        } else {
            StationType::StationDirect
        };
        assert_eq!(s.station_type, kind);
    }

    let first = next_station(&o, MERCURY, jd(2024, 2, 1, 0.0), &SearchConfig::survey())
        .expect("search")
        .expect("a station within the scan bound");
    assert_eq!(first.station_type, StationType::StationRetrograde);
    assert!((first.jd - expected[0]).abs() < 2.0);
}

#[test]
fn sun_enters_aries_march_2024() {
    let events = find_fixed_degree_crossings(
        &oracle(),
        SUN,
        0.0,
        jd(2024, 3, 1, 0.0),
        jd(2024, 4, 1, 0.0),
        &SearchConfig::precise(),
    )
    .expect("search");
    assert_eq!(events.len(), 1);
    assert!((events[0].jd - jd(2024, 3, 20, 3.1)).abs() < 0.1, "{}", events[0].jd);
}

#[test]
fn new_moon_january_2024() {
    let event = next_angular_aspect(
        &oracle(),
        MOON,
        SUN,
        &AspectConfig::conjunction(),
        jd(2024, 1, 1, 0.0),
        &SearchConfig::precise(),
    )
    .expect("search")
    .expect("a new moon within a month");
    assert!((event.jd - jd(2024, 1, 11, 11.95)).abs() < 0.25, "{}", event.jd);
}

#[test]
fn angles_need_a_location() {
    let asc = BodySpec::geocentric(Body::Ascendant);
    let err = find_fixed_degree_crossings(
        &oracle(),
        asc,
        0.0,
        jd(2024, 1, 1, 0.0),
        jd(2024, 1, 3, 0.0),
        &SearchConfig::precise(),
    )
    .unwrap_err();
    assert_eq!(err, SearchError::UnsupportedBody(asc));
}

#[test]
fn ascendant_returns_each_sidereal_day() {
    let o = KeplerOracle::new(
        KeplerConfig::default().with_location(GeoLocation::new(51.48, 0.0, 0.0)),
    )
    .expect("config");
    let start = jd(2024, 6, 1, 0.0);
    let events = find_fixed_degree_crossings(
        &o,
        BodySpec::geocentric(Body::Ascendant),
        0.0,
        start,
        start + 5.0,
        &SearchConfig::precise(),
    )
    .expect("search");
    assert!(events.len() >= 4);
    for w in events.windows(2) {
        assert!((w[1].jd - w[0].jd - 0.997_27).abs() < 0.001);
    }
}

#[test]
fn sun_elapsed_full_turn_is_a_tropical_year() {
    let epoch = jd(2024, 1, 1, 0.0);
    let out = find_elapsed_degree_timestamps(
        &oracle(),
        SUN,
        epoch,
        360.0,
        SearchDirection::Forward,
        &SearchConfig::precise(),
    )
    .expect("search");
    assert_eq!(out.termination, Termination::DirectOnly);
    assert_eq!(out.crossings.len(), 1);
    assert!((out.crossings[0] - epoch - 365.242).abs() < 0.05);
}

#[test]
fn mars_retrograde_loop_is_crossed_three_times() {
    let o = oracle();
    let epoch = jd(2024, 9, 1, 0.0);
    let cfg = SearchConfig::precise();
    let stations =
        find_station_points(&o, MARS, epoch, jd(2025, 4, 30, 0.0), &cfg).expect("stations");
    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0].station_type, StationType::StationRetrograde);

    let mid = 0.5 * (stations[0].longitude_deg + stations[1].longitude_deg);
    let start_lon = o.sample(&MARS, epoch).expect("sample").longitude_deg;
    let elapsed = normalize_360(mid - start_lon);

    let out =
        find_elapsed_degree_timestamps(&o, MARS, epoch, elapsed, SearchDirection::Forward, &cfg)
            .expect("search");
    assert_eq!(out.crossings.len(), 3);
    assert_eq!(out.termination, Termination::PassedTarget);
    assert!(out.crossings[0] < stations[0].jd);
    assert!(stations[0].jd < out.crossings[1] && out.crossings[1] < stations[1].jd);
    assert!(out.crossings[2] > stations[1].jd);
}
