//! Main drive executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Telecommand processing and handling
//!         - Gamepad mapping
//!         - Drive control processing
//!         - Actuation of the demands
//!         - Archiving
//!
//! # Modules
//!
//! All modules (e.g. `drive_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!     2. Write session outputs under the directory given by `State::NAME`.
//!

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use drive_lib::{
    actuation::{apply_dems, SimDrivetrain},
    data_store::{DataStore, SafeModeCause},
    input::Button,
    params::DriveExecParams,
};

mod tc_processor;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::eyre, eyre::WrapErr, Report};
use log::{debug, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use util::{
    archive::Archived,
    logger::logger_init,
    module::State,
    script_interpreter::{PendingTcs, ScriptInterpreter},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    // ---- EARLY INITIALISATION ----

    color_eyre::install()?;

    // Initialise session
    let session = Session::new(
        "drive_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // ---- LOAD PARAMETERS ----

    // Loaded before the logger as they carry the log levels
    let exec_params: DriveExecParams = util::params::load(
        "drive_exec.toml"
    ).wrap_err("Could not load exec params")?;

    // Initialise logger
    logger_init(&exec_params.log, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Drive Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    session.save("drive_exec/params.json", exec_params.clone());

    info!("Exec parameters loaded");

    // ---- LOAD SCRIPT ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    if args.len() != 2 {
        return Err(eyre!(
            "Expected the path to a script as the only argument, found {} arguments",
            args.len() - 1
        ));
    }

    info!("Loading script from \"{}\"", &args[1]);

    let mut script = ScriptInterpreter::new(&args[1])
        .wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} TCs\n",
        script.get_duration(),
        script.get_num_tcs()
    );

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.drive_ctrl.init("drive_ctrl.toml", &session)
        .wrap_err("Failed to initialise DriveCtrl")?;
    info!("DriveCtrl init complete");

    ds.pad = drive_lib::input::Controller::with_deadband(
        Default::default(),
        exec_params.pad_deadband
    );

    let mut drivetrain = SimDrivetrain::new(ds.drive_ctrl.num_swerve_modules());

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    let cycle_period = Duration::from_secs_f64(exec_params.cycle_period_s);
    let cycle_frequency_hz = 1.0 / exec_params.cycle_period_s;

    info!("Begining main loop\n");

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(cycle_frequency_hz, session::get_elapsed_seconds());

        // ---- TELECOMMAND PROCESSING ----

        match script.get_pending_tcs() {
            PendingTcs::None => (),
            PendingTcs::Some(tc_vec) => {
                for tc in tc_vec.iter() {
                    tc_processor::exec(&mut ds, tc);
                }
            }
            // Exit if end of script reached
            PendingTcs::EndOfScript => {
                info!("End of TC script reached, stopping");
                break
            }
        }

        // ---- GAMEPAD MAPPING ----

        if ds.pad.button_pressed_debounced(
            Button::Select,
            exec_params.button_debounce_s,
            ds.time_s
        ) {
            ds.make_safe(SafeModeCause::PadSafeButton);
        }

        // A DRIVE TC in the same cycle takes priority over the pad
        if let Some(mapping) = exec_params.pad_mapping {
            if ds.pad_updated && ds.drive_ctrl_input.cmd.is_none() {
                ds.drive_ctrl_input.cmd = Some(mapping.input(&ds.pad, ds.heading_deg));
            }
        }

        // ---- CONTROL ALGORITHM PROCESSING ----

        // Safe mode may have changed while processing TCs
        ds.drive_ctrl_input.safe = ds.safe;

        match ds.drive_ctrl.proc(&ds.drive_ctrl_input) {
            Ok((o, r)) => {
                ds.drive_ctrl_output = o;
                ds.drive_ctrl_status_rpt = r;
            },
            Err(e) => warn!("Error during DriveCtrl processing: {}", e)
        };

        // ---- ACTUATION ----

        if let Err(e) = apply_dems(&ds.drive_ctrl_output, &mut drivetrain) {
            warn!("Could not apply drive demands: {}", e);
            ds.make_safe(SafeModeCause::ActuationError);
        }

        // ---- WRITE ARCHIVES ----

        if let Err(e) = ds.drive_ctrl.write() {
            warn!("Could not write DriveCtrl archives: {}", e);
        }

        if ds.is_1_hz_cycle {
            debug!(
                "Cycle {}: dems {:?}, report {:?}",
                ds.num_cycles,
                ds.drive_ctrl_output,
                ds.drive_ctrl_status_rpt
            );
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;

                if ds.num_consec_cycle_overruns > exec_params.max_consec_cycle_overruns {
                    ds.make_safe(SafeModeCause::CycleOverruns);
                }
            }
        }

        ds.cycle_end();
    }

    // ---- SHUTDOWN ----

    info!("End of execution");

    session.exit();

    Ok(())
}
