//! [`KeplerOracle`]: an [`AngleOracle`] built from the analytic theories in
//! this crate.

use thiserror::Error;
use tracing::debug;

use cael_search::{
    AngleOracle, AngleSample, Body, BodySpec, Centricity, J2000_JD, LongitudeFrame, OracleError,
    normalize_360, normalize_to_pm180,
};

use crate::elements::{AU_KM, has_elements, heliocentric_position_au};
use crate::moon::{mean_node_deg, moon_position};
use crate::precession::{LAHIRI_J2000_DEG, ayanamsha_deg, general_precession_deg};
use crate::sidereal::{
    ascendant_deg, gmst_rad, local_sidereal_time_rad, mean_obliquity_rad, midheaven_deg,
};

/// First supported instant, 1600-01-01 0h.
pub const MIN_JD: f64 = 2_305_447.5;
/// End of the supported span, 2200-01-01 0h.
pub const MAX_JD: f64 = 2_524_593.5;

/// Equatorial Earth radius used for the observer offset, km.
const EARTH_RADIUS_KM: f64 = 6_378.14;

/// Errors constructing a [`KeplerOracle`].
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum KeplerError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

/// Observer position on the Earth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive.
    pub longitude_deg: f64,
    /// Altitude above sea level in metres.
    pub altitude_m: f64,
}

impl GeoLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    fn validate(&self) -> Result<(), &'static str> {
        if !(self.latitude_deg.is_finite() && self.latitude_deg.abs() <= 90.0) {
            return Err("latitude_deg must be within [-90, 90]");
        }
        if !(self.longitude_deg.is_finite() && self.longitude_deg.abs() <= 180.0) {
            return Err("longitude_deg must be within [-180, 180]");
        }
        if !self.altitude_m.is_finite() {
            return Err("altitude_m must be finite");
        }
        Ok(())
    }
}

/// Settings for [`KeplerOracle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerConfig {
    /// Observer, required for topocentric positions and the angles.
    pub location: Option<GeoLocation>,
    /// Sidereal zodiac offset at J2000, degrees.
    pub ayanamsha_j2000_deg: f64,
    /// Half-width of the central difference used for speeds, days.
    pub speed_step_days: f64,
}

impl Default for KeplerConfig {
    fn default() -> Self {
        Self {
            location: None,
            ayanamsha_j2000_deg: LAHIRI_J2000_DEG,
            speed_step_days: 0.01,
        }
    }
}

impl KeplerConfig {
    pub fn with_location(mut self, location: GeoLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_ayanamsha_j2000_deg(mut self, deg: f64) -> Self {
        self.ayanamsha_j2000_deg = deg;
        self
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(loc) = &self.location {
            loc.validate()?;
        }
        if !self.ayanamsha_j2000_deg.is_finite() {
            return Err("ayanamsha_j2000_deg must be finite");
        }
        if !(self.speed_step_days > 0.0 && self.speed_step_days <= 1.0) {
            return Err("speed_step_days must be in (0, 1]");
        }
        Ok(())
    }
}

/// Reference oracle: mean-element planets, truncated lunar series, mean
/// node, and the ascendant/midheaven from mean sidereal time.
///
/// Positions are good to a few arcminutes for the planets and a few
/// hundredths of a degree for the Moon between 1800 and 2050, and degrade
/// slowly outside that span. Instants outside 1600-2200 are refused.
#[derive(Debug, Clone)]
pub struct KeplerOracle {
    config: KeplerConfig,
}

impl KeplerOracle {
    pub fn new(config: KeplerConfig) -> Result<Self, KeplerError> {
        config.validate().map_err(KeplerError::InvalidConfig)?;
        debug!(
            location = ?config.location,
            ayanamsha_j2000_deg = config.ayanamsha_j2000_deg,
            "kepler oracle ready"
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &KeplerConfig {
        &self.config
    }

    /// Longitude of `spec` at `jd` in degrees, not normalized.
    pub fn longitude_deg(&self, spec: &BodySpec, jd: f64) -> Result<f64, OracleError> {
        if !self.supports(spec) {
            return Err(OracleError::Unsupported(*spec));
        }
        if !(MIN_JD..MAX_JD).contains(&jd) {
            return Err(OracleError::EpochOutOfRange { jd });
        }
        let t = (jd - J2000_JD) / 36_525.0;
        let tropical = self.tropical_of_date(spec, jd, t)?;
        Ok(match spec.frame {
            LongitudeFrame::Tropical => tropical,
            LongitudeFrame::Sidereal => tropical - ayanamsha_deg(self.config.ayanamsha_j2000_deg, t),
        })
    }

    fn tropical_of_date(&self, spec: &BodySpec, jd: f64, t: f64) -> Result<f64, OracleError> {
        match spec.body {
            Body::MeanNode => return Ok(mean_node_deg(t)),
            Body::Ascendant | Body::Midheaven => {
                let loc = self.location(spec)?;
                let lst = local_sidereal_time_rad(gmst_rad(jd), loc.longitude_rad());
                let eps = mean_obliquity_rad(t);
                return Ok(if spec.body == Body::Ascendant {
                    ascendant_deg(lst, eps, loc.latitude_rad())
                } else {
                    midheaven_deg(lst, eps)
                });
            }
            _ => {}
        }

        let mut v = match spec.centricity {
            Centricity::Heliocentric => precess(planet(spec, t)?, t),
            Centricity::Geocentric | Centricity::Topocentric => geocentric_of_date(spec, t)?,
        };
        if spec.centricity == Centricity::Topocentric {
            let obs = observer_of_date_au(self.location(spec)?, jd, t);
            v = [v[0] - obs[0], v[1] - obs[1], v[2] - obs[2]];
        }
        Ok(v[1].atan2(v[0]).to_degrees())
    }

    fn location(&self, spec: &BodySpec) -> Result<&GeoLocation, OracleError> {
        self.config
            .location
            .as_ref()
            .ok_or(OracleError::Unsupported(*spec))
    }

    fn angle_has_location(&self, body: Body) -> bool {
        !body.is_angle() || self.config.location.is_some()
    }
}

impl AngleOracle for KeplerOracle {
    fn sample(&self, spec: &BodySpec, jd: f64) -> Result<AngleSample, OracleError> {
        let h = self.config.speed_step_days;
        let lon = self.longitude_deg(spec, jd)?;
        let before = self.longitude_deg(spec, jd - h)?;
        let after = self.longitude_deg(spec, jd + h)?;
        Ok(AngleSample {
            longitude_deg: normalize_360(lon),
            longitude_speed_deg_per_day: normalize_to_pm180(after - before) / (2.0 * h),
        })
    }

    fn supports(&self, spec: &BodySpec) -> bool {
        let body = spec.body;
        match spec.centricity {
            Centricity::Heliocentric => has_elements(body),
            Centricity::Geocentric => body != Body::Earth && self.angle_has_location(body),
            Centricity::Topocentric => body != Body::Earth && self.config.location.is_some(),
        }
    }
}

fn planet(spec: &BodySpec, t: f64) -> Result<[f64; 3], OracleError> {
    heliocentric_position_au(spec.body, t).ok_or(OracleError::Unsupported(*spec))
}

/// Geocentric ecliptic vector of date, au.
fn geocentric_of_date(spec: &BodySpec, t: f64) -> Result<[f64; 3], OracleError> {
    if spec.body == Body::Moon {
        let (lon, lat, dist_km) = moon_position(t);
        return Ok(spherical_to_cartesian(lon, lat, dist_km / AU_KM));
    }
    let earth = heliocentric_position_au(Body::Earth, t).ok_or(OracleError::Unsupported(*spec))?;
    let v = if spec.body == Body::Sun {
        [-earth[0], -earth[1], -earth[2]]
    } else {
        let p = planet(spec, t)?;
        [p[0] - earth[0], p[1] - earth[1], p[2] - earth[2]]
    };
    Ok(precess(v, t))
}

/// Rotate a J2000 ecliptic vector about the ecliptic pole by the general
/// precession. The slow motion of the ecliptic plane itself is ignored.
fn precess(v: [f64; 3], t: f64) -> [f64; 3] {
    let (s, c) = general_precession_deg(t).to_radians().sin_cos();
    [v[0] * c - v[1] * s, v[0] * s + v[1] * c, v[2]]
}

/// Observer's geocentric position in ecliptic coordinates of date, au.
fn observer_of_date_au(loc: &GeoLocation, jd: f64, t: f64) -> [f64; 3] {
    let rho = (EARTH_RADIUS_KM + loc.altitude_m / 1000.0) / AU_KM;
    let lst = local_sidereal_time_rad(gmst_rad(jd), loc.longitude_rad());
    let lat = loc.latitude_rad();
    let eq = [
        rho * lat.cos() * lst.cos(),
        rho * lat.cos() * lst.sin(),
        rho * lat.sin(),
    ];
    let (se, ce) = mean_obliquity_rad(t).sin_cos();
    [eq[0], eq[1] * ce + eq[2] * se, -eq[1] * se + eq[2] * ce]
}

fn spherical_to_cartesian(lon_deg: f64, lat_deg: f64, r: f64) -> [f64; 3] {
    let (sl, cl) = lon_deg.to_radians().sin_cos();
    let (sb, cb) = lat_deg.to_radians().sin_cos();
    [r * cb * cl, r * cb * sl, r * sb]
}
