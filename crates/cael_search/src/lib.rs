//! Cyclic angular event locator.
//!
//! Finds the instants at which a sampled angular quantity crosses a target
//! value: aspects between two longitudes, passages of a fixed degree,
//! stationary points, and elapsed-degree anniversaries since an epoch.
//!
//! This crate provides:
//! - The [`AngleOracle`] contract for whatever supplies longitudes
//! - Metrics over oracle samples (separation, separation modulo an angle,
//!   offset from a fixed point, longitude speed, elapsed degrees)
//! - A fixed-step scanner with seam-aware crossing detection
//! - Bisection refinement to a caller-chosen time tolerance
//!
//! All state lives in the call; nothing is cached between searches.

pub mod angle;
pub mod aspect;
pub mod detector;
pub mod elapsed;
pub mod error;
pub mod fixed;
pub mod metric;
pub mod oracle;
pub mod refine;
pub mod scanner;
pub mod search_types;
pub(crate) mod search_util;
pub mod station;
pub mod step_policy;
pub mod targets;
pub mod time;
pub mod window;

pub use angle::{FULL_TURN_DEG, normalize_360, normalize_mod, normalize_to_pm180, unwrap_near};
pub use aspect::{
    find_angular_aspects, find_modulo_aspects, next_angular_aspect, prev_angular_aspect,
};
pub use detector::{Bracket, CrossingDetector, Motion, WrapRule};
pub use elapsed::find_elapsed_degree_timestamps;
pub use error::SearchError;
pub use fixed::find_fixed_degree_crossings;
pub use metric::{AveragePolicy, LongitudeSource, Metric};
pub use oracle::{
    ALL_BODIES, AngleOracle, AngleSample, Body, BodySpec, Centricity, LongitudeFrame, OracleError,
    UnknownIdentifier, default_direct_only,
};
pub use refine::BisectionRefiner;
pub use scanner::Scanner;
pub use search_types::{
    AspectConfig, CancelToken, CrossingEvent, ElapsedOutcome, SearchConfig, SearchDirection,
    StationEvent, StationType, Termination,
};
pub use station::{find_station_points, next_station, prev_station};
pub use step_policy::{DEFAULT_STEP_DAYS, StepPolicy, table_step_days};
pub use targets::{TargetMatch, TargetSet};
pub use time::{
    CalendarDate, J2000_JD, SECONDS_PER_DAY, calendar_to_jd, hours_to_days, jd_to_calendar,
    jd_to_centuries, seconds_to_days,
};
pub use window::{Sample, SampleWindow};
