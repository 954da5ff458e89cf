//! General precession in longitude and the mean ayanamsha.
//!
//! Source: Capitaine, Wallace & Chapront 2003 (IAU 2006), Table 1.

/// Lahiri ayanamsha at J2000.0, degrees.
pub const LAHIRI_J2000_DEG: f64 = 23.853;

/// Accumulated general precession in ecliptic longitude since J2000, degrees.
///
/// `t` is Julian centuries from J2000. Positive `t` gives positive values:
/// tropical longitudes of fixed points increase.
pub fn general_precession_deg(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    let arcsec = 5_028.796_195 * t + 1.105_434_8 * t2 + 0.000_079_64 * t3
        - 0.000_023_857 * t4
        - 0.000_000_038_3 * t5;
    arcsec / 3600.0
}

/// Mean ayanamsha at `t` for a system anchored at `j2000_deg`.
pub fn ayanamsha_deg(j2000_deg: f64, t: f64) -> f64 {
    j2000_deg + general_precession_deg(t)
}
