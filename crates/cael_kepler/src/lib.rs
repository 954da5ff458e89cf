//! Analytic reference oracle for `cael_search`.
//!
//! [`KeplerOracle`] answers longitude queries from closed-form theories:
//! mean Keplerian elements for the planets, the leading lunar terms, the
//! mean node polynomial, and the ascendant and midheaven from mean sidereal
//! time. It needs no data files and is accurate enough to drive scenario
//! tests, benches and the command line.

pub mod elements;
pub mod moon;
pub mod oracle;
pub mod precession;
pub mod sidereal;

pub use elements::{AU_KM, has_elements, heliocentric_position_au, solve_kepler};
pub use moon::{mean_node_deg, moon_position};
pub use oracle::{GeoLocation, KeplerConfig, KeplerError, KeplerOracle, MAX_JD, MIN_JD};
pub use precession::{LAHIRI_J2000_DEG, ayanamsha_deg, general_precession_deg};
pub use sidereal::{
    ascendant_deg, earth_rotation_angle_rad, gmst_rad, local_sidereal_time_rad,
    mean_obliquity_rad, midheaven_deg,
};
