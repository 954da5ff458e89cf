//! Stationary points: times when a body's longitude speed changes sign.
//!
//! Speed going from non-negative to negative is a retrograde station; from
//! negative to non-negative a direct station. A zero speed counts as
//! non-negative.

use crate::angle::normalize_360;
use crate::detector::Motion;
use crate::error::SearchError;
use crate::metric::Metric;
use crate::oracle::{AngleOracle, BodySpec};
use crate::search_types::{CrossingEvent, SearchConfig, SearchDirection, StationEvent, StationType};
use crate::search_util::{scan_first, scan_window};
use crate::targets::TargetSet;
use tracing::debug;

/// Direct-only bodies are still scanned; the result is simply empty.
fn note_direct_only<O: AngleOracle + ?Sized>(oracle: &O, body: &BodySpec) {
    if oracle.is_direct_only(body.centricity, body.body) {
        debug!(body = %body, "station search on a direct-only body");
    }
}

fn to_station<O: AngleOracle + ?Sized>(
    oracle: &O,
    body: &BodySpec,
    event: CrossingEvent,
) -> Result<StationEvent, SearchError> {
    let station_type = match event.motion {
        Motion::Falling => StationType::StationRetrograde,
        Motion::Rising => StationType::StationDirect,
    };
    let longitude_deg = normalize_360(oracle.sample(body, event.jd)?.longitude_deg);
    Ok(StationEvent {
        jd: event.jd,
        longitude_deg,
        station_type,
    })
}

/// All stations of `body` in `[jd_start, jd_end]`, chronologically.
pub fn find_station_points<O: AngleOracle + ?Sized>(
    oracle: &O,
    body: BodySpec,
    jd_start: f64,
    jd_end: f64,
    config: &SearchConfig,
) -> Result<Vec<StationEvent>, SearchError> {
    note_direct_only(oracle, &body);
    let metric = Metric::VelocitySign(body);
    scan_window(
        oracle,
        &metric,
        TargetSet::zero_crossing(),
        jd_start,
        jd_end,
        config,
    )?
    .into_iter()
    .map(|e| to_station(oracle, &body, e))
    .collect()
}

fn find_station_event<O: AngleOracle + ?Sized>(
    oracle: &O,
    body: BodySpec,
    jd: f64,
    direction: SearchDirection,
    config: &SearchConfig,
) -> Result<Option<StationEvent>, SearchError> {
    note_direct_only(oracle, &body);
    let metric = Metric::VelocitySign(body);
    scan_first(oracle, &metric, TargetSet::zero_crossing(), jd, direction, config)?
        .map(|e| to_station(oracle, &body, e))
        .transpose()
}

/// Next station of `body` after `jd`.
pub fn next_station<O: AngleOracle + ?Sized>(
    oracle: &O,
    body: BodySpec,
    jd: f64,
    config: &SearchConfig,
) -> Result<Option<StationEvent>, SearchError> {
    find_station_event(oracle, body, jd, SearchDirection::Forward, config)
}

/// Previous station of `body` before `jd`.
pub fn prev_station<O: AngleOracle + ?Sized>(
    oracle: &O,
    body: BodySpec,
    jd: f64,
    config: &SearchConfig,
) -> Result<Option<StationEvent>, SearchError> {
    find_station_event(oracle, body, jd, SearchDirection::Backward, config)
}
