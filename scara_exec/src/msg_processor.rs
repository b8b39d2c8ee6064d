//! # Panel message processor
//!
//! Executes inbound bus messages by routing their data into the data store
//! and the readout's offset tables. Message handling never stops the exec,
//! a message the readout rejects is logged and dropped.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};

// Internal
use panel_if::msg::PanelMsg;
use scara_lib::data_store::DataStore;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute an inbound panel message.
pub(crate) fn exec(ds: &mut DataStore, msg: &PanelMsg) {
    match msg {
        PanelMsg::Status(status) => {
            // The latest status wins if several arrive in one cycle
            ds.readout_input.status = Some(status.clone());
        }
        PanelMsg::Post { data } => {
            info!("Machine terminal: {}", data);
        }
        PanelMsg::SetWorkOffset { data } => {
            debug!("Work offset table replaced ({} records)", data.len());
            ds.readout.replace_work_offsets(data.clone());
        }
        PanelMsg::ChangeWorkOffset { data } => match ds.readout.select_work_offset(data) {
            Ok(()) => info!("Active work offset now \"{}\"", data),
            Err(e) => warn!("Work offset change rejected: {}", e),
        },
        PanelMsg::SetToolOffset { data } => {
            debug!("Tool offset table replaced ({} records)", data.len());
            if let Err(e) = ds.readout.replace_tool_offsets(data.clone()) {
                warn!("Tool offset table applied but unusable: {}", e);
            }
        }
        PanelMsg::ChangeToolOffset { data } => match ds.readout.select_tool_offset(data) {
            Ok(()) => info!("Active tool offset now \"{}\"", data),
            Err(e) => warn!("Tool offset change failed: {}", e),
        },
        PanelMsg::PopulateFiles { data } => {
            info!("Machine lists {} runnable file(s)", data.len());
            ds.machine_files = data.clone();
        }
    }
}
