//! Geocentric Moon from the leading terms of the ELP-2000/82 periodic
//! series (Meeus, Astronomical Algorithms, ch. 47), and the mean lunar node.
//!
//! Longitudes are referred to the mean equinox of date. The truncated
//! series is good to roughly 0.05 deg in longitude.

/// Fundamental lunar arguments in degrees: `(L', D, M, M', F)`.
fn arguments_deg(t: f64) -> (f64, f64, f64, f64, f64) {
    let t2 = t * t;
    let lp = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2;
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2;
    let mp = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2;
    let f = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2;
    (lp, d, m, mp, f)
}

/// Longitude and distance terms: multiples of (D, M, M', F), sine
/// coefficient (1e-6 deg), cosine coefficient (m).
#[rustfmt::skip]
const LON_DIST_TERMS: [(i8, i8, i8, i8, f64, f64); 20] = [
    (0,  0,  1,  0, 6_288_774.0, -20_905_355.0),
    (2,  0, -1,  0, 1_274_027.0,  -3_699_111.0),
    (2,  0,  0,  0,   658_314.0,  -2_955_968.0),
    (0,  0,  2,  0,   213_618.0,    -569_925.0),
    (0,  1,  0,  0,  -185_116.0,      48_888.0),
    (0,  0,  0,  2,  -114_332.0,      -3_149.0),
    (2,  0, -2,  0,    58_793.0,     246_158.0),
    (2, -1, -1,  0,    57_066.0,    -152_138.0),
    (2,  0,  1,  0,    53_322.0,    -170_733.0),
    (2, -1,  0,  0,    45_758.0,    -204_586.0),
    (0,  1, -1,  0,   -40_923.0,    -129_620.0),
    (1,  0,  0,  0,   -34_720.0,     108_743.0),
    (0,  1,  1,  0,   -30_383.0,     104_755.0),
    (2,  0,  0, -2,    15_327.0,      10_321.0),
    (0,  0,  1,  2,   -12_528.0,           0.0),
    (0,  0,  1, -2,    10_980.0,      79_661.0),
    (4,  0, -1,  0,    10_675.0,     -34_782.0),
    (0,  0,  3,  0,    10_034.0,     -23_210.0),
    (4,  0, -2,  0,     8_548.0,     -21_636.0),
    (2,  1, -1,  0,    -7_888.0,      24_208.0),
];

/// Latitude terms: multiples of (D, M, M', F), sine coefficient (1e-6 deg).
#[rustfmt::skip]
const LAT_TERMS: [(i8, i8, i8, i8, f64); 8] = [
    (0, 0,  0, 1, 5_128_122.0),
    (0, 0,  1, 1,   280_602.0),
    (0, 0,  1, -1,  277_693.0),
    (2, 0,  0, -1,  173_237.0),
    (2, 0, -1, 1,    55_413.0),
    (2, 0, -1, -1,   46_271.0),
    (2, 0,  0, 1,    32_573.0),
    (0, 0,  2, 1,    17_198.0),
];

fn combine(k: (i8, i8, i8, i8), d: f64, m: f64, mp: f64, f: f64) -> f64 {
    (f64::from(k.0) * d + f64::from(k.1) * m + f64::from(k.2) * mp + f64::from(k.3) * f)
        .to_radians()
}

/// Geocentric Moon: `(longitude_deg, latitude_deg, distance_km)` at `t`
/// Julian centuries after J2000. Longitude is unnormalized.
pub fn moon_position(t: f64) -> (f64, f64, f64) {
    let (lp, d, m, mp, f) = arguments_deg(t);

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &(kd, km, kmp, kf, sl, cr) in &LON_DIST_TERMS {
        let arg = combine((kd, km, kmp, kf), d, m, mp, f);
        sum_l += sl * arg.sin();
        sum_r += cr * arg.cos();
    }
    let mut sum_b = 0.0;
    for &(kd, km, kmp, kf, sb) in &LAT_TERMS {
        sum_b += sb * combine((kd, km, kmp, kf), d, m, mp, f).sin();
    }

    (
        lp + sum_l * 1e-6,
        sum_b * 1e-6,
        385_000.56 + sum_r * 1e-3,
    )
}

/// Mean longitude of the Moon's ascending node, degrees, unnormalized.
///
/// The fifth Delaunay argument (IERS Conventions 2010, Table 5.2e).
pub fn mean_node_deg(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let arcsec = 450_160.398_036 - 6_962_890.543_1 * t + 7.472_2 * t2 + 0.007_702 * t3
        - 0.000_059_39 * t4;
    arcsec / 3600.0
}
