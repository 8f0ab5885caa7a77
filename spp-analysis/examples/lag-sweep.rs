//! Find close pairs in a trajectory written by the simulation engine, and
//! print their statistics at increasing lags as JSON.
//!
//! Usage: `lag-sweep <trajectory.bin> <parameters.json> <half-length> [min-half-length] [max-lag]`
//!
//! `half-length` is the half-extent `L` of the box, and `min-half-length` its
//! smallest half-extent `L_min`, which defaults to `L` for square boxes.
use log::{Record, Metadata, LevelFilter};

use spp_analysis::{PairSearch, PairSet, SimulationBox, Trajectory};
use spp_analysis::trajectory::read_trajectory;

/// Implementation of `log::Log` sending all messages to the standard error
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        return true;
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {} -- {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let path = args.next().expect("expected a path to a trajectory");
    let parameters = args.next().expect("expected a path to the search parameters");
    let half_length = args.next().expect("expected the half length of the box").parse::<f64>()?;
    let min_half_length = args.next().map(|length| length.parse::<f64>()).transpose()?;
    let max_lag = args.next().map(|lag| lag.parse::<usize>()).transpose()?;

    if !(half_length > 0.0 && half_length.is_finite() && min_half_length.map_or(true, |l_min| l_min > 0.0 && l_min <= half_length)) {
        return Err("box half lengths must be positive, with min-half-length at most half-length".into());
    }
    let simulation_box = SimulationBox::new(half_length, min_half_length.unwrap_or(half_length));

    log::set_boxed_logger(Box::new(StderrLogger))?;
    if cfg!(debug_assertions) {
        log::set_max_level(LevelFilter::Debug);
    } else {
        log::set_max_level(LevelFilter::Info);
    }

    time_graph::enable_data_collection(true);

    let file = std::fs::File::open(&path)?;
    let trajectory = read_trajectory(file, simulation_box)?;

    let search = PairSearch::from_json(&std::fs::read_to_string(&parameters)?)?;
    let mut pairs = PairSet::new(&trajectory);
    pairs.find_particles_with(&search)?;

    let last_lag = trajectory.len() - search.step - 1;
    let last_lag = max_lag.map_or(last_lag, |max_lag| usize::min(max_lag, last_lag));
    let lags = (0..=last_lag).collect::<Vec<_>>();

    let statistics = pairs.lag_sweep(&lags)?;
    println!("{}", serde_json::to_string_pretty(&statistics)?);

    // (this requires the "table" feature for the time_graph crate)
    eprintln!("{}", time_graph::get_full_graph().as_short_table());

    Ok(())
}
