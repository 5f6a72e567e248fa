//! Main BCI wheelchair replay executable entry point.
//! 
//! # Architecture
//! 
//! The general execution methodology consists of:
//! 
//!     - Initialise the session, logging and trajectory control
//!     - Start loading the sample data in the background
//!     - Main loop:
//!         - Data input: install the sample feed once it has loaded
//!         - Trajectory control processing, when the tick gate allows
//!         - Archiving and status display
//!         - Cycle management
//! 
//! Rendering is not performed here, the archived trajectory and the status log are the outputs
//! of the executable.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{Report, eyre::{WrapErr, eyre}};
use log::{debug, info, warn};
use owo_colors::OwoColorize;
use std::env;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use bci_lib::{
    data_loader::DataLoader,
    data_store::DataStore,
    params::ExecParams,
    tick::TickGate,
};
use util::{
    archive::Archived,
    host,
    logger::logger_init,
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of consecutive not-ready ticks after which a warning is issued, and then repeated.
const NOT_READY_WARN_TICKS: u64 = 600;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "bci_exec", 
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // ---- LOAD PARAMETERS ----

    let exec_params: ExecParams = util::params::load("bci_exec.toml")
        .wrap_err("Could not load exec params")?;
    exec_params.validate()
        .wrap_err("Invalid exec params")?;

    // Initialise logger
    logger_init(&exec_params.log, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("BCI Wheelchair Replay Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    info!("Exec parameters loaded");

    // ---- DATA FILE ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    // A single argument overrides the data file from the parameters
    let data_file = match args.len() {
        1 => exec_params.data_file.clone(),
        2 => args[1].clone(),
        n => return Err(eyre!("Expected either zero or one argument, found {}", n - 1))
    };
    let data_path = resolve_data_path(&data_file)?;

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();
    ds.traj_ctrl_input.dt = exec_params.dt_per_tick;

    // ---- INITIALISE MODULES ----

    ds.traj_ctrl.init("traj_ctrl.toml", &session)
        .wrap_err("Failed to initialise TrajCtrl")?;
    info!("TrajCtrl init complete");

    info!("Module initialisation complete\n");

    // ---- START DATA LOAD ----

    info!("Loading sample data from {:?}", data_path);
    let mut loader = DataLoader::spawn(&data_path);

    let mut tick_gate = TickGate::new(
        exec_params.tick_min_period_s.map(Duration::from_secs_f64)
    );

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(exec_params.cycle_frequency_hz());

        // ---- DATA INPUT ----

        match loader.poll() {
            Some(Ok(feed)) => {
                info!(
                    "Loaded {} samples from {:?}", 
                    feed.len(), 
                    loader.path()
                );
                ds.traj_ctrl.load_feed(feed)
                    .wrap_err("Failed to provide the sample feed to TrajCtrl")?;
            },
            Some(Err(e)) => return Err(e)
                .wrap_err(format!("Failed to load sample data from {:?}", data_path)),
            None => ()
        }

        // ---- CONTROL ALGORITHM PROCESSING ----

        ds.tick_due = tick_gate.is_due(cycle_start_instant);

        if ds.tick_due {
            match ds.traj_ctrl.proc(&ds.traj_ctrl_input) {
                Ok((_, r)) => ds.traj_ctrl_status_rpt = r,
                Err(e) => warn!("Error during TrajCtrl processing: {}", e)
            }

            if ds.traj_ctrl_status_rpt.feed_wrapped {
                info!("End of sample feed reached, replaying from the start");
            }

            // ---- WRITE ARCHIVES ----

            if let Err(e) = ds.traj_ctrl.write() {
                warn!("Could not write TrajCtrl archive: {}", e);
            }
        }

        // ---- STATUS ----

        if ds.is_1_hz_cycle {
            match ds.traj_ctrl.output() {
                Some(o) if ds.traj_ctrl.is_ready() => info!(
                    "Thought: {} | pose = ({:.3}, {:.3}, {:.3} rad) | v = {:.4}, w = {:.4}",
                    o.thought().green(),
                    o.pose.x(),
                    o.pose.z(),
                    o.pose.heading_rad,
                    o.cmd.linear,
                    o.cmd.angular
                ),
                _ => info!("Waiting for sample data from {:?}", loader.path())
            }
        }

        if ds.num_consec_not_ready > 0 && ds.num_consec_not_ready % NOT_READY_WARN_TICKS == 0 {
            warn!(
                "No sample data after {} ticks, still waiting on {:?}",
                ds.num_consec_not_ready,
                loader.path()
            );
        }

        ds.cycle_end();

        // Exit once the tick limit has been reached
        if let Some(max) = exec_params.max_ticks {
            if ds.traj_ctrl.state().num_ticks >= max {
                info!("Tick limit of {} reached, stopping", max);
                break;
            }
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(exec_params.cycle_period_s)
            .checked_sub(cycle_dur)
        {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                ds.num_consec_cycle_overruns += 1;
                warn!(
                    "Cycle overran by {:.06} s ({} consecutive)",
                    cycle_dur.as_secs_f64() - exec_params.cycle_period_s,
                    ds.num_consec_cycle_overruns
                );
            }
        }
    }

    // ---- SHUTDOWN ----

    session.save("traj_ctrl/final_state.json", ds.traj_ctrl.state().clone());
    session.exit();

    info!("End of execution");

    Ok(())
}

/// Resolve the data file path, relative paths are taken relative to the software root.
fn resolve_data_path(data_file: &str) -> Result<PathBuf, Report> {
    let path = PathBuf::from(data_file);

    if path.is_absolute() {
        return Ok(path);
    }

    let root = host::get_bci_sw_root()
        .wrap_err("The software root (BCI_SW_ROOT) is needed to find the sample data")?;

    Ok(root.join(path))
}
