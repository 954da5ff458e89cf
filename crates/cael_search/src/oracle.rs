//! The contract between the locator and whatever supplies longitudes.
//!
//! The locator never computes a position itself. Everything it knows about
//! a body at an instant comes from an [`AngleOracle`]: one ecliptic
//! longitude and one longitude speed per `(BodySpec, jd)` pair.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Bodies and sensitive points the locator can track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    /// Mean ascending lunar node.
    MeanNode,
    /// Ascendant, derived from local sidereal time.
    Ascendant,
    /// Midheaven (MC), derived from local sidereal time.
    Midheaven,
}

/// All bodies in declaration order.
pub const ALL_BODIES: [Body; 14] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Earth,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::MeanNode,
    Body::Ascendant,
    Body::Midheaven,
];

impl Body {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Earth => "Earth",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
            Self::MeanNode => "MeanNode",
            Self::Ascendant => "Ascendant",
            Self::Midheaven => "Midheaven",
        }
    }

    /// Angle-type points that sweep the full zodiac once a sidereal day.
    pub const fn is_angle(self) -> bool {
        matches!(self, Self::Ascendant | Self::Midheaven)
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sun" => Ok(Self::Sun),
            "moon" => Ok(Self::Moon),
            "mercury" => Ok(Self::Mercury),
            "venus" => Ok(Self::Venus),
            "earth" => Ok(Self::Earth),
            "mars" => Ok(Self::Mars),
            "jupiter" => Ok(Self::Jupiter),
            "saturn" => Ok(Self::Saturn),
            "uranus" => Ok(Self::Uranus),
            "neptune" => Ok(Self::Neptune),
            "pluto" => Ok(Self::Pluto),
            "meannode" | "mean_node" | "node" | "rahu" => Ok(Self::MeanNode),
            "ascendant" | "asc" => Ok(Self::Ascendant),
            "midheaven" | "mc" => Ok(Self::Midheaven),
            _ => Err(UnknownIdentifier::new("body", s)),
        }
    }
}

/// Reference point for the longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Centricity {
    #[default]
    Geocentric,
    Topocentric,
    Heliocentric,
}

impl Centricity {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Geocentric => "geocentric",
            Self::Topocentric => "topocentric",
            Self::Heliocentric => "heliocentric",
        }
    }
}

impl FromStr for Centricity {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "geocentric" | "geo" => Ok(Self::Geocentric),
            "topocentric" | "topo" => Ok(Self::Topocentric),
            "heliocentric" | "helio" => Ok(Self::Heliocentric),
            _ => Err(UnknownIdentifier::new("centricity", s)),
        }
    }
}

/// Zodiac reference frame for the longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LongitudeFrame {
    #[default]
    Tropical,
    Sidereal,
}

impl LongitudeFrame {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tropical => "tropical",
            Self::Sidereal => "sidereal",
        }
    }
}

impl FromStr for LongitudeFrame {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tropical" => Ok(Self::Tropical),
            "sidereal" => Ok(Self::Sidereal),
            _ => Err(UnknownIdentifier::new("longitude frame", s)),
        }
    }
}

/// A string that did not name a known body, centricity or frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownIdentifier {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownIdentifier {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// What to sample: a body seen from a reference point in a zodiac frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodySpec {
    pub body: Body,
    pub centricity: Centricity,
    pub frame: LongitudeFrame,
}

impl BodySpec {
    pub const fn new(body: Body, centricity: Centricity, frame: LongitudeFrame) -> Self {
        Self {
            body,
            centricity,
            frame,
        }
    }

    /// Geocentric tropical longitude of `body`.
    pub const fn geocentric(body: Body) -> Self {
        Self::new(body, Centricity::Geocentric, LongitudeFrame::Tropical)
    }

    /// Heliocentric tropical longitude of `body`.
    pub const fn heliocentric(body: Body) -> Self {
        Self::new(body, Centricity::Heliocentric, LongitudeFrame::Tropical)
    }

    /// Topocentric tropical longitude of `body`.
    pub const fn topocentric(body: Body) -> Self {
        Self::new(body, Centricity::Topocentric, LongitudeFrame::Tropical)
    }

    /// Same body and centricity in the sidereal frame.
    pub const fn sidereal(self) -> Self {
        Self::new(self.body, self.centricity, LongitudeFrame::Sidereal)
    }
}

impl Display for BodySpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.body,
            self.centricity.name(),
            self.frame.name()
        )
    }
}

/// One oracle answer for one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSample {
    /// Ecliptic longitude in degrees. Oracles should return [0, 360) but
    /// the locator normalizes anyway.
    pub longitude_deg: f64,
    /// Longitude speed in degrees per day; negative while retrograde.
    pub longitude_speed_deg_per_day: f64,
}

/// Failures reported by an oracle.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum OracleError {
    #[error("unsupported body specification: {0}")]
    Unsupported(BodySpec),
    #[error("epoch out of range: {jd}")]
    EpochOutOfRange { jd: f64 },
    #[error("oracle failure: {0}")]
    Failed(String),
}

/// Source of longitudes and longitude speeds.
///
/// Implementations must be deterministic: the locator re-samples the same
/// instant during bisection and expects the same answer. Nothing here takes
/// `&mut self`, so an oracle that is also `Sync` can serve many searches on
/// different threads at once.
pub trait AngleOracle {
    /// Longitude and speed of `spec` at Julian Date `jd`.
    fn sample(&self, spec: &BodySpec, jd: f64) -> Result<AngleSample, OracleError>;

    /// Whether this oracle can answer for `spec` at all.
    fn supports(&self, _spec: &BodySpec) -> bool {
        true
    }

    /// Whether `body` seen from `centricity` never moves retrograde.
    fn is_direct_only(&self, centricity: Centricity, body: Body) -> bool {
        default_direct_only(centricity, body)
    }

    /// Preferred scan step in days, overriding the static step table.
    fn step_size_hint(&self, _spec: &BodySpec) -> Option<f64> {
        None
    }
}

/// Static direct-motion facts.
///
/// Geocentrically only the Sun and Moon never station. Heliocentric orbits
/// are always prograde. The node regresses and the angles are not orbital
/// bodies at all, so neither counts as direct-only.
pub fn default_direct_only(centricity: Centricity, body: Body) -> bool {
    match body {
        Body::MeanNode | Body::Ascendant | Body::Midheaven => false,
        Body::Sun | Body::Moon => true,
        _ => centricity == Centricity::Heliocentric,
    }
}

impl<T: AngleOracle + ?Sized> AngleOracle for &T {
    fn sample(&self, spec: &BodySpec, jd: f64) -> Result<AngleSample, OracleError> {
        (**self).sample(spec, jd)
    }

    fn supports(&self, spec: &BodySpec) -> bool {
        (**self).supports(spec)
    }

    fn is_direct_only(&self, centricity: Centricity, body: Body) -> bool {
        (**self).is_direct_only(centricity, body)
    }

    fn step_size_hint(&self, spec: &BodySpec) -> Option<f64> {
        (**self).step_size_hint(spec)
    }
}

impl<T: AngleOracle + ?Sized> AngleOracle for Box<T> {
    fn sample(&self, spec: &BodySpec, jd: f64) -> Result<AngleSample, OracleError> {
        (**self).sample(spec, jd)
    }

    fn supports(&self, spec: &BodySpec) -> bool {
        (**self).supports(spec)
    }

    fn is_direct_only(&self, centricity: Centricity, body: Body) -> bool {
        (**self).is_direct_only(centricity, body)
    }

    fn step_size_hint(&self, spec: &BodySpec) -> Option<f64> {
        (**self).step_size_hint(spec)
    }
}
