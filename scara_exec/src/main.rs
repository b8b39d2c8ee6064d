//! # SCARA panel readout executable
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//! - Initialise the session, logger and modules
//! - Main loop:
//!     - Acquire inbound messages from the replay script
//!     - Process messages into the data store
//!     - Run readout processing
//!     - Write archives
//!     - Cycle management
//!
//! Messages normally arrive over the backend bus. This executable replays
//! them from a timed script instead, so a capture of a machining session can
//! be folded into frames over and over while the readout is worked on.

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use scara_lib::data_store::DataStore;

mod msg_processor;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use util::{
    archive::Archived,
    logger::{logger_init, LevelFilter},
    module::State,
    script_interpreter::{PendingMsgs, ScriptInterpreter},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
///
/// Units: seconds
const CYCLE_PERIOD_S: f64 = 0.10;

/// Number of cycles per second
const CYCLE_FREQUENCY_HZ: f64 = 1.0 / CYCLE_PERIOD_S;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("scara_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution
    info!("SCARA Panel Readout Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- INITIALISE MESSAGE SOURCE ----

    let args: Vec<String> = env::args().collect();

    let mut script = match args.len() {
        2 => {
            info!("Loading message script from \"{}\"", &args[1]);

            let si =
                ScriptInterpreter::new(&args[1]).wrap_err("Failed to load the message script")?;

            info!(
                "Loaded script lasts {:.02} s and contains {} messages\n",
                si.get_duration(),
                si.get_num_msgs()
            );

            si
        }
        _ => {
            return Err(eyre!(
                "Expected the path to a message script as the only argument, found {} arguments",
                args.len() - 1
            ))
        }
    };

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.readout
        .init("readout.toml", &session)
        .wrap_err("Failed to initialise Readout")?;
    info!("Readout init complete");

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {
        // Get the cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(CYCLE_FREQUENCY_HZ);

        // ---- MESSAGE PROCESSING ----

        match script.get_pending_msgs() {
            PendingMsgs::None => (),
            PendingMsgs::Some(msg_vec) => {
                for msg in msg_vec.iter() {
                    msg_processor::exec(&mut ds, msg);
                }
            }
            // Exit when the end of the script is reached
            PendingMsgs::EndOfScript => {
                info!("End of message script reached, stopping");
                break;
            }
        }

        // ---- READOUT PROCESSING ----

        match ds.readout.proc(&ds.readout_input) {
            Ok((output, report)) => {
                ds.readout_output = output;
                ds.readout_status_rpt = report;
            }
            // A status that cannot be folded into a frame is dropped, the
            // previous frame stays on display
            Err(e) => warn!("Error during Readout processing: {}", e),
        };

        // ---- WRITE ARCHIVES ----

        // The readout itself only adds rows for cycles that reduced a
        // fresh status
        if let Err(e) = ds.readout.write() {
            warn!("Could not write Readout archives: {}", e);
        }

        // ---- SUMMARY ----

        if ds.is_1_hz_cycle && !ds.readout_output.state.is_empty() {
            info!(
                "[{}] work {} / tool {}: cart ({:.3}, {:.3}) mm",
                ds.readout_output.state,
                ds.readout_output.work_offset,
                ds.readout_output.tool_offset,
                ds.readout_output.cart_x_mm,
                ds.readout_output.cart_y_mm
            );
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Sleep for the remainder of the cycle
        match Duration::from_secs_f64(CYCLE_PERIOD_S).checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - CYCLE_PERIOD_S
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        // Increment the cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    // Save the offset tables as they stand at the end of the run, plus the
    // machine's file list if one was reported
    session::save("offsets.json", ds.readout.offset_snapshot());

    if !ds.machine_files.is_empty() {
        session::save("machine_files.json", ds.machine_files.clone());
    }

    info!("End of execution");

    session.exit();

    Ok(())
}
