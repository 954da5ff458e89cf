//! Scalar metrics built from oracle samples.
//!
//! A [`Metric`] turns one instant into the single value the scanner tracks:
//! a separation, a separation modulo some angle, an offset from a fixed
//! point, a raw speed, or the distance travelled since an epoch.

use crate::angle::{FULL_TURN_DEG, normalize_360, normalize_mod, unwrap_near};
use crate::detector::WrapRule;
use crate::error::SearchError;
use crate::oracle::{AngleOracle, BodySpec};

/// How averaged longitudes treat the 0/360 seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AveragePolicy {
    /// Arithmetic mean of the longitudes exactly as the oracle returns them.
    ///
    /// Operands straddling the seam (e.g. 350 and 10) average to the wrong
    /// side of the circle; aspects found through such an average cannot be
    /// relied upon.
    #[default]
    Raw,
    /// Each operand is first moved to the turn closest to the first operand,
    /// so 350 and 10 average to 0 rather than 180.
    Unwrapped,
}

/// One longitude, or the mean longitude of several bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum LongitudeSource {
    Single(BodySpec),
    Averaged(Vec<BodySpec>),
}

impl LongitudeSource {
    pub fn single(spec: BodySpec) -> Self {
        Self::Single(spec)
    }

    /// Mean of `specs`. Rejects an empty list.
    pub fn averaged(specs: Vec<BodySpec>) -> Result<Self, SearchError> {
        if specs.is_empty() {
            return Err(SearchError::InvalidInput(
                "averaged longitude needs at least one body".into(),
            ));
        }
        Ok(Self::Averaged(specs))
    }

    pub fn specs(&self) -> &[BodySpec] {
        match self {
            Self::Single(spec) => std::slice::from_ref(spec),
            Self::Averaged(specs) => specs,
        }
    }

    /// Longitude in degrees, normalized to [0, 360).
    pub fn longitude<O: AngleOracle + ?Sized>(
        &self,
        oracle: &O,
        jd: f64,
        policy: AveragePolicy,
    ) -> Result<f64, SearchError> {
        match self {
            Self::Single(spec) => Ok(normalize_360(oracle.sample(spec, jd)?.longitude_deg)),
            Self::Averaged(specs) => {
                let mut sum = 0.0;
                let mut reference = None;
                for spec in specs {
                    let lon = oracle.sample(spec, jd)?.longitude_deg;
                    let lon = match (policy, reference) {
                        (AveragePolicy::Unwrapped, Some(r)) => unwrap_near(lon, r, FULL_TURN_DEG),
                        _ => lon,
                    };
                    reference.get_or_insert(lon);
                    sum += lon;
                }
                Ok(normalize_360(sum / specs.len() as f64))
            }
        }
    }
}

impl From<BodySpec> for LongitudeSource {
    fn from(spec: BodySpec) -> Self {
        Self::Single(spec)
    }
}

/// The scalar tracked by a search.
#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
    /// `normalize(lon(a) - lon(b))`.
    Difference {
        a: LongitudeSource,
        b: LongitudeSource,
    },
    /// `normalize(lon(a) - lon(b)) mod modulus`.
    ModuloMultiple {
        a: LongitudeSource,
        b: LongitudeSource,
        modulus: f64,
    },
    /// `normalize(lon(source) - point_deg)`.
    FixedOffset {
        source: LongitudeSource,
        point_deg: f64,
    },
    /// Longitude speed in degrees per day.
    VelocitySign(BodySpec),
    /// `normalize(lon(body, t) - lon(body, epoch))`; the scanner's revolution
    /// counter turns it into unbounded elapsed degrees.
    ElapsedFromEpoch {
        body: BodySpec,
        epoch_jd: f64,
        epoch_longitude_deg: f64,
    },
}

impl Metric {
    /// Elapsed-degree metric anchored at `epoch_jd`, sampling the epoch once.
    pub fn elapsed_from_epoch<O: AngleOracle + ?Sized>(
        oracle: &O,
        body: BodySpec,
        epoch_jd: f64,
    ) -> Result<Self, SearchError> {
        let epoch_longitude_deg = normalize_360(oracle.sample(&body, epoch_jd)?.longitude_deg);
        Ok(Self::ElapsedFromEpoch {
            body,
            epoch_jd,
            epoch_longitude_deg,
        })
    }

    /// Value at `jd`. Angular metrics are reduced into [0, cycle).
    pub fn evaluate<O: AngleOracle + ?Sized>(
        &self,
        oracle: &O,
        jd: f64,
        policy: AveragePolicy,
    ) -> Result<f64, SearchError> {
        match self {
            Self::Difference { a, b } => {
                let la = a.longitude(oracle, jd, policy)?;
                let lb = b.longitude(oracle, jd, policy)?;
                Ok(normalize_360(la - lb))
            }
            Self::ModuloMultiple { a, b, modulus } => {
                let la = a.longitude(oracle, jd, policy)?;
                let lb = b.longitude(oracle, jd, policy)?;
                Ok(normalize_mod(normalize_360(la - lb), *modulus))
            }
            Self::FixedOffset { source, point_deg } => {
                let lon = source.longitude(oracle, jd, policy)?;
                Ok(normalize_360(lon - point_deg))
            }
            Self::VelocitySign(spec) => Ok(oracle.sample(spec, jd)?.longitude_speed_deg_per_day),
            Self::ElapsedFromEpoch {
                body,
                epoch_longitude_deg,
                ..
            } => {
                let lon = oracle.sample(body, jd)?.longitude_deg;
                Ok(normalize_360(lon - epoch_longitude_deg))
            }
        }
    }

    /// Length of the metric's own cycle, or `None` for unbounded values.
    pub fn modulus(&self) -> Option<f64> {
        match self {
            Self::ModuloMultiple { modulus, .. } => Some(*modulus),
            Self::VelocitySign(_) => None,
            _ => Some(FULL_TURN_DEG),
        }
    }

    /// How consecutive samples are stitched across the cycle boundary.
    pub fn wrap_rule(&self) -> WrapRule {
        match self {
            Self::ModuloMultiple { modulus, .. } => WrapRule::Crossover(*modulus),
            Self::VelocitySign(_) => WrapRule::None,
            _ => WrapRule::HalfCycle(FULL_TURN_DEG),
        }
    }

    /// Every body the metric samples.
    pub fn body_specs(&self) -> Vec<BodySpec> {
        match self {
            Self::Difference { a, b } | Self::ModuloMultiple { a, b, .. } => {
                a.specs().iter().chain(b.specs()).copied().collect()
            }
            Self::FixedOffset { source, .. } => source.specs().to_vec(),
            Self::VelocitySign(spec) => vec![*spec],
            Self::ElapsedFromEpoch { body, .. } => vec![*body],
        }
    }

    /// Check every sampled body against the oracle before any sampling.
    pub fn check_supported<O: AngleOracle + ?Sized>(&self, oracle: &O) -> Result<(), SearchError> {
        for spec in self.body_specs() {
            if !oracle.supports(&spec) {
                return Err(SearchError::UnsupportedBody(spec));
            }
        }
        Ok(())
    }
}
