use std::fmt::Display;

use cael_kepler::{GeoLocation, KeplerConfig, KeplerOracle};
use cael_search::{
    AspectConfig, Body, BodySpec, CalendarDate, Centricity, CrossingEvent, LongitudeFrame,
    SearchConfig, SearchDirection, find_angular_aspects, find_elapsed_degree_timestamps,
    find_fixed_degree_crossings, find_modulo_aspects, find_station_points,
};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cael", about = "Cyclic angular event locator")]
struct Cli {
    /// Log search progress to stderr (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Times when lon(body1) - lon(body2) reaches a separation
    Aspects {
        #[arg(long)]
        body1: Body,
        #[arg(long)]
        body2: Body,
        /// Separation in degrees, 0-360
        #[arg(long, default_value = "0")]
        target: f64,
        /// Search only the exact separation, not also 360 - target
        #[arg(long)]
        uni: bool,
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        oracle: OracleArgs,
    },
    /// Times when the separation, modulo an angle, reaches a target
    Modulo {
        #[arg(long)]
        body1: Body,
        #[arg(long)]
        body2: Body,
        /// Modulus in degrees; must divide 360
        #[arg(long)]
        modulus: f64,
        /// Target within one modulus, degrees
        #[arg(long, default_value = "0")]
        target: f64,
        #[arg(long)]
        uni: bool,
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        oracle: OracleArgs,
    },
    /// Times when a body passes a fixed zodiac degree
    Crossings {
        #[arg(long)]
        body: Body,
        /// Zodiac degree, 0-360
        #[arg(long)]
        degree: f64,
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        oracle: OracleArgs,
    },
    /// Retrograde and direct stations of a body
    Stations {
        #[arg(long)]
        body: Body,
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        oracle: OracleArgs,
    },
    /// Times when a body has travelled a number of degrees since an epoch
    Elapsed {
        #[arg(long)]
        body: Body,
        /// UTC epoch (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        epoch: CalendarDate,
        /// Degrees of travel; negative with --backward
        #[arg(long, allow_negative_numbers = true)]
        degrees: f64,
        /// Search back in time from the epoch
        #[arg(long)]
        backward: bool,
        #[arg(long, default_value = "1")]
        max_error_seconds: f64,
        #[command(flatten)]
        oracle: OracleArgs,
    },
}

#[derive(Args)]
struct WindowArgs {
    /// UTC start (YYYY-MM-DDThh:mm:ssZ)
    #[arg(long)]
    start: CalendarDate,
    /// UTC end (YYYY-MM-DDThh:mm:ssZ)
    #[arg(long)]
    end: CalendarDate,
    /// Time tolerance of reported events
    #[arg(long, default_value = "1")]
    max_error_seconds: f64,
}

#[derive(Args)]
struct OracleArgs {
    /// geocentric, topocentric or heliocentric
    #[arg(long, default_value = "geocentric")]
    centricity: Centricity,
    /// tropical or sidereal (Lahiri)
    #[arg(long, default_value = "tropical")]
    frame: LongitudeFrame,
    /// Observer latitude, degrees north (topocentric and angles)
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Observer longitude, degrees east
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,
    /// Observer altitude, metres
    #[arg(long, default_value = "0")]
    alt: f64,
}

impl OracleArgs {
    fn spec(&self, body: Body) -> BodySpec {
        BodySpec::new(body, self.centricity, self.frame)
    }

    fn oracle(&self) -> KeplerOracle {
        let mut config = KeplerConfig::default();
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            config = config.with_location(GeoLocation::new(lat, lon, self.alt));
        }
        debug!(centricity = self.centricity.name(), frame = self.frame.name(), "oracle");
        KeplerOracle::new(config).unwrap_or_else(|e| fail(e))
    }
}

fn fail(msg: impl Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn search_config(max_error_seconds: f64) -> SearchConfig {
    SearchConfig::precise().with_max_error_seconds(max_error_seconds)
}

fn print_crossings(events: &[CrossingEvent]) {
    if events.is_empty() {
        println!("No events in range");
        return;
    }
    for e in events {
        println!(
            "{}  JD {:.6}  target {:.4} deg  {:?}",
            CalendarDate::from_jd(e.jd),
            e.jd,
            e.target_deg,
            e.motion
        );
    }
    println!("{} event(s)", events.len());
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Aspects {
            body1,
            body2,
            target,
            uni,
            window,
            oracle,
        } => {
            let aspect = AspectConfig {
                target_deg: target,
                uni_directional: uni,
            };
            let events = find_angular_aspects(
                &oracle.oracle(),
                oracle.spec(body1),
                oracle.spec(body2),
                &aspect,
                window.start.to_jd(),
                window.end.to_jd(),
                &search_config(window.max_error_seconds),
            )
            .unwrap_or_else(|e| fail(e));
            print_crossings(&events);
        }

        Commands::Modulo {
            body1,
            body2,
            modulus,
            target,
            uni,
            window,
            oracle,
        } => {
            let aspect = AspectConfig {
                target_deg: target,
                uni_directional: uni,
            };
            let events = find_modulo_aspects(
                &oracle.oracle(),
                oracle.spec(body1),
                oracle.spec(body2),
                modulus,
                &aspect,
                window.start.to_jd(),
                window.end.to_jd(),
                &search_config(window.max_error_seconds),
            )
            .unwrap_or_else(|e| fail(e));
            print_crossings(&events);
        }

        Commands::Crossings {
            body,
            degree,
            window,
            oracle,
        } => {
            let events = find_fixed_degree_crossings(
                &oracle.oracle(),
                oracle.spec(body),
                degree,
                window.start.to_jd(),
                window.end.to_jd(),
                &search_config(window.max_error_seconds),
            )
            .unwrap_or_else(|e| fail(e));
            print_crossings(&events);
        }

        Commands::Stations {
            body,
            window,
            oracle,
        } => {
            let stations = find_station_points(
                &oracle.oracle(),
                oracle.spec(body),
                window.start.to_jd(),
                window.end.to_jd(),
                &search_config(window.max_error_seconds),
            )
            .unwrap_or_else(|e| fail(e));
            if stations.is_empty() {
                println!("No stations in range");
            }
            for s in &stations {
                println!(
                    "{}  JD {:.6}  {:<10}  lon {:.4} deg",
                    CalendarDate::from_jd(s.jd),
                    s.jd,
                    s.station_type.label(),
                    s.longitude_deg
                );
            }
        }

        Commands::Elapsed {
            body,
            epoch,
            degrees,
            backward,
            max_error_seconds,
            oracle,
        } => {
            let direction = if backward {
                SearchDirection::Backward
            } else {
                SearchDirection::Forward
            };
            let out = find_elapsed_degree_timestamps(
                &oracle.oracle(),
                oracle.spec(body),
                epoch.to_jd(),
                degrees,
                direction,
                &search_config(max_error_seconds),
            )
            .unwrap_or_else(|e| fail(e));
            for jd in &out.crossings {
                println!("{}  JD {jd:.6}", CalendarDate::from_jd(*jd));
            }
            println!(
                "{} crossing(s), stopped: {:?}",
                out.crossings.len(),
                out.termination
            );
        }
    }
}
