//! Target values a search looks for.

use crate::angle::{FULL_TURN_DEG, normalize_mod};
use crate::error::SearchError;

/// How target values are matched against the unwrapped metric track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetMatch {
    /// Any value congruent to the target modulo the cycle.
    Periodic { cycle: f64 },
    /// The exact value only (elapsed degrees, speed zero).
    Absolute,
}

/// A set of target values in [0, cycle], plus the matching rule.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSet {
    values: Vec<f64>,
    matching: TargetMatch,
}

impl TargetSet {
    /// Separation targets: `d` and, unless `uni_directional`, `360 - d`.
    pub fn aspect(target_deg: f64, uni_directional: bool) -> Result<Self, SearchError> {
        Self::cyclic(target_deg, FULL_TURN_DEG, uni_directional)
    }

    /// A single fixed degree point, reached from either side.
    pub fn fixed_degree(fixed_deg: f64) -> Result<Self, SearchError> {
        Self::cyclic(fixed_deg, FULL_TURN_DEG, true)
    }

    /// Offset within a repeating cycle of `modulus` degrees.
    ///
    /// `modulus` must divide 360 evenly: otherwise the remainder drops to
    /// zero at the 0/360 seam without passing through the cycle end.
    pub fn modulo(offset_deg: f64, modulus: f64, uni_directional: bool) -> Result<Self, SearchError> {
        if !modulus.is_finite() || modulus <= 0.0 || modulus > FULL_TURN_DEG {
            return Err(SearchError::InvalidInput(format!(
                "modulus must be in (0, 360], got {modulus}"
            )));
        }
        let turns = FULL_TURN_DEG / modulus;
        if (turns - turns.round()).abs() > 1e-9 {
            return Err(SearchError::InvalidInput(format!(
                "modulus must divide 360 evenly, got {modulus}"
            )));
        }
        Self::cyclic(offset_deg, modulus, uni_directional)
    }

    /// Zero of an unbounded signal (longitude speed).
    pub fn zero_crossing() -> Self {
        Self {
            values: vec![0.0],
            matching: TargetMatch::Absolute,
        }
    }

    /// One exact unbounded value (elapsed degrees).
    pub fn absolute(value: f64) -> Result<Self, SearchError> {
        if !value.is_finite() {
            return Err(SearchError::InvalidInput(format!(
                "target must be finite, got {value}"
            )));
        }
        Ok(Self {
            values: vec![value],
            matching: TargetMatch::Absolute,
        })
    }

    fn cyclic(target: f64, cycle: f64, uni_directional: bool) -> Result<Self, SearchError> {
        if !target.is_finite() {
            return Err(SearchError::InvalidInput(format!(
                "target must be finite, got {target}"
            )));
        }
        let d = normalize_mod(target, cycle);
        let mut values = vec![d];
        if !uni_directional {
            let complement = normalize_mod(cycle - d, cycle);
            if (complement - d).abs() > 1e-12 {
                values.push(complement);
            }
        }
        // A value on the boundary can be observed as either end.
        if values.contains(&0.0) {
            values.push(cycle);
        }
        Ok(Self {
            values,
            matching: TargetMatch::Periodic { cycle },
        })
    }

    /// Target values as configured, including the boundary duplicate.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn matching(&self) -> TargetMatch {
        self.matching
    }

    /// Distinct targets: periodic values collapsed modulo the cycle.
    fn classes(&self) -> Vec<f64> {
        match self.matching {
            TargetMatch::Absolute => self.values.clone(),
            TargetMatch::Periodic { cycle } => {
                let mut out: Vec<f64> = Vec::with_capacity(self.values.len());
                for &v in &self.values {
                    let c = normalize_mod(v, cycle);
                    if !out.iter().any(|&o| (o - c).abs() < 1e-12) {
                        out.push(c);
                    }
                }
                out
            }
        }
    }

    /// Targets crossed between `lo` and `hi` (`lo < hi`), half-open `(lo, hi]`.
    ///
    /// Returns `(representative, target)` pairs: the representative is the
    /// value on the unwrapped track, the target is the configured value.
    pub fn crossed(&self, lo: f64, hi: f64) -> Vec<(f64, f64)> {
        let mut out = Vec::new();
        for class in self.classes() {
            match self.matching {
                TargetMatch::Absolute => {
                    if lo < class && class <= hi {
                        out.push((class, class));
                    }
                }
                TargetMatch::Periodic { cycle } => {
                    let k = ((lo - class) / cycle).floor() + 1.0;
                    let mut rep = class + k * cycle;
                    // Guard against floor() landing one turn short on exact ties.
                    if rep <= lo {
                        rep += cycle;
                    }
                    if rep <= hi {
                        out.push((rep, class));
                    }
                }
            }
        }
        out.sort_by(|a, b| a.0.total_cmp(&b.0));
        out
    }
}
