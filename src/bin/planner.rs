//! `paiv-planner`: reads a map from stdin, writes a program to stdout.
//! Respects `PAIV_TIMEOUT` (seconds) and `PAIV_STRATEGY` (see
//! `paiv::config::PlannerConfig::from_env`).

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use paiv::config::PlannerConfig;
use paiv::io::{read_map, write_program};
use paiv::model::Action;
use paiv::search::PlannerDriver;
use paiv::sim;

fn main() -> io::Result<()> {
    paiv::logger::init_logging();

    let stdin = io::stdin();
    let mut handle = stdin.lock();
    let (ctx, initial) = read_map(&mut handle);

    let config = PlannerConfig::from_env();
    let driver = PlannerDriver::new(config);
    let cancel = Arc::new(AtomicBool::new(false));

    let mut program = driver.run(&ctx, &initial, cancel);

    let replayed = sim::runsim(&ctx, &initial, &program, false);
    if !replayed.is_ended {
        program.push(Action::Abort);
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_program(&mut handle, &program)?;
    handle.flush()
}
