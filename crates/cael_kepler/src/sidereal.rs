//! Earth rotation, sidereal time and the ecliptic angles of a location.
//!
//! Timestamps are treated as UT1 Julian Dates. The difference from the
//! dynamical scale (about a minute over the supported range) is below the
//! accuracy of the analytic theories in this crate.
//!
//! Sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15.
//! - GMST polynomial: Capitaine et al. 2003, Table 2.
//! - Mean obliquity: IAU 2006 (Hilton et al. 2006).

use std::f64::consts::{PI, TAU};

use cael_search::J2000_JD;

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Earth Rotation Angle in radians, `[0, 2pi)`.
pub fn earth_rotation_angle_rad(jd_ut1: f64) -> f64 {
    let du = jd_ut1 - J2000_JD;
    (TAU * (0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du)).rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time in radians, `[0, 2pi)`.
pub fn gmst_rad(jd_ut1: f64) -> f64 {
    let t = (jd_ut1 - J2000_JD) / 36_525.0;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    let poly_arcsec = 0.014_506 + 4_612.156_534 * t + 1.391_581_7 * t2
        - 0.000_000_44 * t3
        - 0.000_029_956 * t4
        - 0.000_000_036_8 * t5;
    (earth_rotation_angle_rad(jd_ut1) + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}

/// Local sidereal time: GMST plus east longitude, radians in `[0, 2pi)`.
pub fn local_sidereal_time_rad(gmst: f64, longitude_east_rad: f64) -> f64 {
    (gmst + longitude_east_rad).rem_euclid(TAU)
}

/// Mean obliquity of the ecliptic at `t` Julian centuries from J2000, radians.
pub fn mean_obliquity_rad(t: f64) -> f64 {
    let arcsec = 84_381.406 - 46.836_769 * t - 0.000_183_1 * t * t + 0.002_003_40 * t * t * t;
    arcsec * ARCSEC_TO_RAD
}

/// Ecliptic longitude of the Midheaven (degrees, `[0, 360)`) for local
/// sidereal time `lst` and obliquity `eps`, both radians.
pub fn midheaven_deg(lst: f64, eps: f64) -> f64 {
    lst.sin()
        .atan2(lst.cos() * eps.cos())
        .to_degrees()
        .rem_euclid(360.0)
}

/// Ecliptic longitude of the Ascendant (degrees, `[0, 360)`): the point of
/// the ecliptic rising on the eastern horizon at latitude `lat`.
///
/// Undefined inside the polar circles where the ecliptic can coincide with
/// the horizon; callers restrict latitude.
pub fn ascendant_deg(lst: f64, eps: f64, lat: f64) -> f64 {
    let y = lst.cos();
    let x = -(lst.sin() * eps.cos() + lat.tan() * eps.sin());
    y.atan2(x).to_degrees().rem_euclid(360.0)
}
