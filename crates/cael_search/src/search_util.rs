//! Plumbing shared by the window-bounded entry points.

use tracing::debug;

use crate::error::SearchError;
use crate::metric::Metric;
use crate::oracle::AngleOracle;
use crate::scanner::Scanner;
use crate::search_types::{CrossingEvent, SearchConfig, SearchDirection};
use crate::targets::TargetSet;

pub(crate) fn validate_window(jd_start: f64, jd_end: f64) -> Result<(), SearchError> {
    if !jd_start.is_finite() || !jd_end.is_finite() {
        return Err(SearchError::InvalidInput(
            "window bounds must be finite".into(),
        ));
    }
    if jd_end < jd_start {
        return Err(SearchError::InvalidInput(format!(
            "window end {jd_end} is before start {jd_start}"
        )));
    }
    Ok(())
}

/// Every crossing of `targets` by `metric` inside `[jd_start, jd_end]`.
pub(crate) fn scan_window<O: AngleOracle + ?Sized>(
    oracle: &O,
    metric: &Metric,
    targets: TargetSet,
    jd_start: f64,
    jd_end: f64,
    config: &SearchConfig,
) -> Result<Vec<CrossingEvent>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    validate_window(jd_start, jd_end)?;
    metric.check_supported(oracle)?;

    if jd_end == jd_start {
        return Ok(Vec::new());
    }

    let mut events = Scanner::new(
        oracle,
        metric,
        targets,
        config,
        jd_start,
        jd_end,
        SearchDirection::Forward,
    )
    .collect_events()?;
    events.retain(|e| e.jd >= jd_start && e.jd <= jd_end);
    debug!(jd_start, jd_end, found = events.len(), "window search finished");
    Ok(events)
}

/// First crossing from `jd` in `direction`, within `max_scan_days`.
pub(crate) fn scan_first<O: AngleOracle + ?Sized>(
    oracle: &O,
    metric: &Metric,
    targets: TargetSet,
    jd: f64,
    direction: SearchDirection,
    config: &SearchConfig,
) -> Result<Option<CrossingEvent>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    if !jd.is_finite() {
        return Err(SearchError::InvalidInput("start must be finite".into()));
    }
    metric.check_supported(oracle)?;

    let limit = jd + direction.sign() * config.max_scan_days;
    let mut scanner = Scanner::new(oracle, metric, targets, config, jd, limit, direction);
    let found = scanner.next().transpose()?;
    debug!(jd, ?direction, found = found.map(|e| e.jd), "open-ended search finished");
    Ok(found)
}
