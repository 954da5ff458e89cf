//! Elapsed-degree search: when has a body travelled a given number of
//! degrees since an epoch?
//!
//! The tracked value is the unbounded distance along the zodiac from the
//! body's position at the epoch, counting whole revolutions. Retrograde
//! bodies can pass the same elapsed value three times (forward, back in
//! the loop, forward again), so the scan keeps going after the first hit
//! until the body can no longer come back.

use tracing::debug;

use crate::error::SearchError;
use crate::metric::Metric;
use crate::oracle::{AngleOracle, BodySpec};
use crate::scanner::Scanner;
use crate::search_types::{ElapsedOutcome, SearchConfig, SearchDirection, Termination};
use crate::targets::TargetSet;

/// No retrograde loop spans this many degrees, so a body this far past the
/// target (or this far the wrong way from the epoch) is done.
const RETURN_LIMIT_DEG: f64 = 120.0;

fn validate_elapsed(elapsed_deg: f64, direction: SearchDirection) -> Result<(), SearchError> {
    if !elapsed_deg.is_finite() {
        return Err(SearchError::InvalidInput(format!(
            "elapsed degrees must be finite, got {elapsed_deg}"
        )));
    }
    let consistent = match direction {
        SearchDirection::Forward => elapsed_deg > 0.0,
        SearchDirection::Backward => elapsed_deg < 0.0,
    };
    if !consistent {
        return Err(SearchError::InvalidInput(format!(
            "elapsed degrees {elapsed_deg} do not match a {direction:?} search"
        )));
    }
    Ok(())
}

/// Every time `body` has travelled `elapsed_deg` degrees from its position
/// at `epoch_jd`.
///
/// Forward searches need a positive `elapsed_deg`, backward searches a
/// negative one. The scan stops when the body is direct-only and has been
/// found once, when it is more than 120 deg past the target, when it has
/// moved more than 120 deg the wrong way, or after
/// `config.elapsed_scan_days`. Crossings come back in chronological order.
pub fn find_elapsed_degree_timestamps<O: AngleOracle + ?Sized>(
    oracle: &O,
    body: BodySpec,
    epoch_jd: f64,
    elapsed_deg: f64,
    direction: SearchDirection,
    config: &SearchConfig,
) -> Result<ElapsedOutcome, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    if !epoch_jd.is_finite() {
        return Err(SearchError::InvalidInput("epoch must be finite".into()));
    }
    validate_elapsed(elapsed_deg, direction)?;
    if !oracle.supports(&body) {
        return Err(SearchError::UnsupportedBody(body));
    }

    let metric = Metric::elapsed_from_epoch(oracle, body, epoch_jd)?;
    let targets = TargetSet::absolute(elapsed_deg)?;
    let direct_only = oracle.is_direct_only(body.centricity, body.body);
    let sign = direction.sign();
    let limit = epoch_jd + sign * config.elapsed_scan_days;

    debug!(%body, epoch_jd, elapsed_deg, ?direction, direct_only, "elapsed search started");

    let mut scanner = Scanner::new(oracle, &metric, targets, config, epoch_jd, limit, direction);
    let mut crossings = Vec::new();

    let termination = loop {
        let Some(events) = scanner.advance()? else {
            break Termination::ScanLimit;
        };
        crossings.extend(events.iter().map(|e| e.jd));

        if direct_only && !crossings.is_empty() {
            break Termination::DirectOnly;
        }
        let Some(latest) = scanner.latest() else {
            continue;
        };
        if (latest.value - elapsed_deg) * sign > RETURN_LIMIT_DEG {
            break Termination::PassedTarget;
        }
        if -latest.value * sign > RETURN_LIMIT_DEG {
            break Termination::Diverged;
        }
    };

    crossings.sort_by(f64::total_cmp);
    debug!(found = crossings.len(), ?termination, "elapsed search finished");
    Ok(ElapsedOutcome {
        crossings,
        termination,
    })
}
