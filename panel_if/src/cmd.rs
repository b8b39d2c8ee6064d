//! # Outbound panel commands
//!
//! Commands sent by the panel to the machine backend. Like inbound messages
//! they are JSON objects tagged by a snake_case `cmd` field.
//!
//! The enum also derives `StructOpt` so the `panel_cmd` composer (and any
//! test rig) can build commands straight from command line arguments.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use structopt::clap::AppSettings;
use structopt::StructOpt;
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A command sent by the panel to the machine backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, StructOpt)]
#[serde(tag = "cmd", rename_all = "snake_case")]
#[structopt(
    name = "panel_cmd",
    global_setting = AppSettings::AllowNegativeNumbers
)]
pub enum PanelCmd {
    /// Move one or more axes. On a SCARA machine `x` and `y` are the
    /// shoulder and elbow joint angles in degrees.
    #[structopt(name = "move")]
    Move {
        /// Target shoulder angle, degrees.
        #[structopt(long)]
        #[serde(skip_serializing_if = "Option::is_none")]
        x: Option<f64>,

        /// Target elbow angle, degrees.
        #[structopt(long)]
        #[serde(skip_serializing_if = "Option::is_none")]
        y: Option<f64>,

        /// Target Z position, millimetres.
        #[structopt(long)]
        #[serde(skip_serializing_if = "Option::is_none")]
        z: Option<f64>,

        /// Target A position, degrees.
        #[structopt(long)]
        #[serde(skip_serializing_if = "Option::is_none")]
        a: Option<f64>,

        /// Target B position, degrees.
        #[structopt(long)]
        #[serde(skip_serializing_if = "Option::is_none")]
        b: Option<f64>,

        /// Target C position, degrees.
        #[structopt(long)]
        #[serde(skip_serializing_if = "Option::is_none")]
        c: Option<f64>,

        /// Feed rate for the move.
        #[structopt(long, default_value = "500")]
        f: f64,
    },

    /// Ask the backend to select the active work offset.
    #[structopt(name = "change-work-offset")]
    ChangeWorkOffset {
        /// Name of the offset to select, e.g. "G55".
        #[serde(rename = "data")]
        name: String,
    },

    /// Ask the backend to select the active tool offset.
    #[structopt(name = "change-tool-offset")]
    ChangeToolOffset {
        /// Name of the offset to select, e.g. "T2".
        #[serde(rename = "data")]
        name: String,
    },

    /// Ask the backend to store a work offset record.
    #[structopt(name = "set-work-offset")]
    SetWorkOffset {
        /// Name of the record to store, e.g. "G55".
        name: String,

        /// Work origin along machine X, millimetres.
        x: f64,

        /// Work origin along machine Y, millimetres.
        y: f64,

        /// Work origin along machine Z, millimetres.
        z: f64,

        /// Rotation of the work frame, radians.
        a: f64,
    },

    /// Ask the backend to store a tool offset record.
    #[structopt(name = "set-tool-offset")]
    SetToolOffset {
        /// Name of the record to store, e.g. "T2".
        name: String,

        /// Correction subtracted from the commanded Y, millimetres.
        p: f64,

        /// Effective elbow link length, millimetres.
        l: f64,

        /// Z readout correction, millimetres.
        z: f64,
    },

    /// Read or write a backend setting.
    #[structopt(name = "machine")]
    Machine {
        /// Whether to read ("get") or write ("set") the setting.
        action: MachineAction,

        /// The setting to access, e.g. "$GCode/Offsets".
        command: String,

        /// Value to write, required for "set".
        #[structopt(long)]
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<f64>,
    },

    /// Run a file held on the machine.
    #[structopt(name = "run")]
    Run {
        /// Name of the file to run, as reported by the machine.
        script: String,
    },
}

/// Direction of a [`PanelCmd::Machine`] access.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MachineAction {
    Get,
    Set,
}

/// Error raised when a [`MachineAction`] cannot be parsed from a string.
#[derive(Debug, Error)]
#[error("Expected \"get\" or \"set\", found \"{0}\"")]
pub struct MachineActionParseError(String);

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PanelCmd {
    /// Serialise the command into its bus JSON form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl FromStr for MachineAction {
    type Err = MachineActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get" => Ok(MachineAction::Get),
            "set" => Ok(MachineAction::Set),
            _ => Err(MachineActionParseError(s.to_string())),
        }
    }
}
