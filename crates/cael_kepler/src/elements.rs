//! Heliocentric planet positions from mean Keplerian elements.
//!
//! Elements and their century rates are the "approximate positions of the
//! planets" fit for 1800-2050 (Standish, JPL), referred to the mean
//! ecliptic and equinox of J2000. Accuracy is tens of arcseconds for the
//! inner planets and a few arcminutes for the outer ones inside that span.

use std::f64::consts::TAU;

use cael_search::Body;

/// Astronomical unit in kilometres.
pub const AU_KM: f64 = 149_597_870.7;

/// Mean elements at J2000 and their rates per Julian century.
///
/// Columns: `a` (au), `e`, `I` (deg), `L` (deg), long. perihelion (deg),
/// long. ascending node (deg).
#[derive(Debug, Clone, Copy)]
struct MeanElements {
    base: [f64; 6],
    rate: [f64; 6],
}

#[rustfmt::skip]
const MERCURY: MeanElements = MeanElements {
    base: [0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28, 48.330_765_93],
    rate: [0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75, 0.160_476_89, -0.125_340_81],
};
#[rustfmt::skip]
const VENUS: MeanElements = MeanElements {
    base: [0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18, 76.679_842_55],
    rate: [0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29, 0.002_683_29, -0.277_694_18],
};
/// Earth-Moon barycentre.
#[rustfmt::skip]
const EARTH: MeanElements = MeanElements {
    base: [1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0],
    rate: [0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0],
};
#[rustfmt::skip]
const MARS: MeanElements = MeanElements {
    base: [1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59, 49.559_538_91],
    rate: [0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99, 0.444_410_88, -0.292_573_43],
};
#[rustfmt::skip]
const JUPITER: MeanElements = MeanElements {
    base: [5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83, 100.473_909_09],
    rate: [-0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75, 0.212_526_68, 0.204_691_06],
};
#[rustfmt::skip]
const SATURN: MeanElements = MeanElements {
    base: [9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31, 113.662_424_48],
    rate: [-0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01, -0.418_972_16, -0.288_677_94],
};
#[rustfmt::skip]
const URANUS: MeanElements = MeanElements {
    base: [19.189_164_64, 0.047_257_44, 0.772_637_83, 313.238_104_51, 170.954_276_30, 74.016_925_03],
    rate: [-0.001_961_76, -0.000_043_97, -0.002_429_39, 428.482_027_85, 0.408_052_81, 0.042_405_89],
};
#[rustfmt::skip]
const NEPTUNE: MeanElements = MeanElements {
    base: [30.069_922_76, 0.008_590_48, 1.770_043_47, -55.120_029_69, 44.964_762_27, 131.784_225_74],
    rate: [0.000_262_91, 0.000_051_05, 0.000_353_72, 218.459_453_25, -0.322_414_64, -0.005_086_64],
};
#[rustfmt::skip]
const PLUTO: MeanElements = MeanElements {
    base: [39.482_116_75, 0.248_827_30, 17.140_012_06, 238.929_038_33, 224.068_916_29, 110.303_936_84],
    rate: [-0.000_315_96, 0.000_051_70, 0.000_048_18, 145.207_805_15, -0.040_629_42, -0.011_834_82],
};

fn elements_for(body: Body) -> Option<&'static MeanElements> {
    match body {
        Body::Mercury => Some(&MERCURY),
        Body::Venus => Some(&VENUS),
        Body::Earth => Some(&EARTH),
        Body::Mars => Some(&MARS),
        Body::Jupiter => Some(&JUPITER),
        Body::Saturn => Some(&SATURN),
        Body::Uranus => Some(&URANUS),
        Body::Neptune => Some(&NEPTUNE),
        Body::Pluto => Some(&PLUTO),
        _ => None,
    }
}

/// Whether `body` has an orbit in the element table.
pub fn has_elements(body: Body) -> bool {
    elements_for(body).is_some()
}

/// Solve Kepler's equation `E - e sin E = M` by Newton iteration.
///
/// `m_rad` is the mean anomaly in radians; returns the eccentric anomaly in
/// radians.
pub fn solve_kepler(m_rad: f64, e: f64) -> f64 {
    let m = (m_rad + std::f64::consts::PI).rem_euclid(TAU) - std::f64::consts::PI;
    let mut ecc = m + e * m.sin();
    for _ in 0..30 {
        let delta = (m - (ecc - e * ecc.sin())) / (1.0 - e * ecc.cos());
        ecc += delta;
        if delta.abs() < 1e-14 {
            break;
        }
    }
    ecc
}

/// Heliocentric ecliptic position (au, mean ecliptic and equinox of J2000)
/// of a planet `t` Julian centuries after J2000, or `None` for bodies
/// without orbital elements.
pub fn heliocentric_position_au(body: Body, t: f64) -> Option<[f64; 3]> {
    let el = elements_for(body)?;
    let at = |i: usize| el.base[i] + el.rate[i] * t;

    let a = at(0);
    let e = at(1);
    let incl = at(2).to_radians();
    let mean_long = at(3);
    let peri = at(4);
    let node = at(5);

    let omega = (peri - node).to_radians();
    let node = node.to_radians();
    let m = (mean_long - peri).to_radians();

    let ecc = solve_kepler(m, e);
    let xp = a * (ecc.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ecc.sin();

    let (so, co) = omega.sin_cos();
    let (sn, cn) = node.sin_cos();
    let (si, ci) = incl.sin_cos();

    Some([
        (co * cn - so * sn * ci) * xp + (-so * cn - co * sn * ci) * yp,
        (co * sn + so * cn * ci) * xp + (-so * sn + co * cn * ci) * yp,
        (so * si) * xp + (co * si) * yp,
    ])
}
