//! # Inbound panel messages
//!
//! Messages sent by the machine backend to the panel. Every bus message is a
//! JSON object tagged by a snake_case `cmd` field.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// Internal
use crate::axis::Axis;
use crate::offset::{ToolOffsetTable, WorkOffsetTable};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A message sent by the machine backend to the panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PanelMsg {
    /// Cyclic machine status.
    Status(StatusMsg),

    /// A line for the operator terminal.
    Post { data: String },

    /// Wholesale replacement of the work offset table.
    SetWorkOffset { data: WorkOffsetTable },

    /// Selection of the active work offset by name.
    ChangeWorkOffset { data: String },

    /// Wholesale replacement of the tool offset table.
    SetToolOffset { data: ToolOffsetTable },

    /// Selection of the active tool offset by name.
    ChangeToolOffset { data: String },

    /// The list of runnable files held on the machine.
    PopulateFiles { data: Vec<String> },
}

/// Errors which can occur when parsing a [`PanelMsg`] from JSON.
#[derive(Debug, Error)]
pub enum MsgParseError {
    #[error("Message contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Message has no \"cmd\" tag (or it is not a string)")]
    NoCmdTag,

    #[error("Message with cmd \"{0}\" could not be parsed: {1}")]
    InvalidMsg(String, serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Machine status as reported by the backend.
///
/// All axes are optional since the machine only reports the axes it is fitted
/// with, and readers must tolerate any of them missing. The commanded `x` and
/// `y` of a SCARA machine are the shoulder and elbow joint angles in degrees,
/// not linear positions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StatusMsg {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub c: Option<f64>,

    /// Shoulder joint encoder reading.
    ///
    /// Units: degrees
    pub theta_enc: Option<f64>,

    /// Elbow joint encoder reading.
    ///
    /// Units: degrees
    pub phi_enc: Option<f64>,

    /// Machine state, for example "Idle", "Run" or "Hold".
    #[serde(default)]
    pub state: String,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PanelMsg {
    /// Parse a message from its bus JSON form.
    pub fn from_json(json_str: &str) -> Result<Self, MsgParseError> {
        // Parse the raw string into a JSON value
        let val: Value = match serde_json::from_str(json_str) {
            Ok(v) => v,
            Err(e) => return Err(MsgParseError::InvalidJson(e)),
        };

        // Get the cmd tag, which every message must carry
        let cmd = match val.get("cmd").and_then(Value::as_str) {
            Some(c) => c.to_string(),
            None => return Err(MsgParseError::NoCmdTag),
        };

        match serde_json::from_value(val) {
            Ok(msg) => Ok(msg),
            Err(e) => Err(MsgParseError::InvalidMsg(cmd, e)),
        }
    }
}

impl StatusMsg {
    /// The raw reading for the given axis, or `None` if the status does not
    /// carry it.
    pub fn axis(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::A => self.a,
            Axis::B => self.b,
            Axis::C => self.c,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partial_status_parsed() {
        let msg = PanelMsg::from_json(
            "{\"cmd\": \"status\", \"x\": 1.0, \"z\": -2.5, \"theta_enc\": 10.0, \
             \"phi_enc\": 90.0, \"state\": \"Run\"}",
        )
        .unwrap();

        match msg {
            PanelMsg::Status(status) => {
                assert_eq!(status.x, Some(1.0));
                assert_eq!(status.y, None);
                assert_eq!(status.z, Some(-2.5));
                assert_eq!(status.theta_enc, Some(10.0));
                assert_eq!(status.phi_enc, Some(90.0));
                assert_eq!(status.state, "Run");
                assert_eq!(status.axis(Axis::X), Some(1.0));
                assert_eq!(status.axis(Axis::B), None);
            }
            _ => panic!("Expected PanelMsg::Status"),
        }
    }

    #[test]
    fn test_status_without_state_defaults_empty() {
        let msg = PanelMsg::from_json("{\"cmd\": \"status\", \"y\": 4.2}").unwrap();

        match msg {
            PanelMsg::Status(status) => assert_eq!(status.state, ""),
            _ => panic!("Expected PanelMsg::Status"),
        }
    }

    #[test]
    fn test_offset_table_push_parsed() {
        let msg = PanelMsg::from_json(
            "{\"cmd\": \"set_work_offset\", \"data\": {\
             \"G54\": {\"x\": 0.0, \"y\": 0.0, \"z\": 0.0, \"a\": 0.0}, \
             \"G55\": {\"x\": 10.0, \"y\": 5.0, \"z\": 2.0, \"a\": 0.5}}}",
        )
        .unwrap();

        match msg {
            PanelMsg::SetWorkOffset { data } => {
                assert_eq!(data.len(), 2);
                assert_eq!(data["G55"].a, 0.5);
            }
            _ => panic!("Expected PanelMsg::SetWorkOffset"),
        }
    }

    #[test]
    fn test_selection_msgs_parsed() {
        assert_eq!(
            PanelMsg::from_json("{\"cmd\": \"change_work_offset\", \"data\": \"G55\"}").unwrap(),
            PanelMsg::ChangeWorkOffset {
                data: "G55".to_string()
            }
        );
        assert_eq!(
            PanelMsg::from_json("{\"cmd\": \"change_tool_offset\", \"data\": \"T2\"}").unwrap(),
            PanelMsg::ChangeToolOffset {
                data: "T2".to_string()
            }
        );
    }

    #[test]
    fn test_populate_files_parsed() {
        let msg =
            PanelMsg::from_json("{\"cmd\": \"populate_files\", \"data\": [\"a.ngc\", \"b.ngc\"]}")
                .unwrap();

        assert_eq!(
            msg,
            PanelMsg::PopulateFiles {
                data: vec!["a.ngc".to_string(), "b.ngc".to_string()]
            }
        );
    }

    #[test]
    fn test_unknown_cmd_rejected() {
        match PanelMsg::from_json("{\"cmd\": \"warp_drive\"}") {
            Err(MsgParseError::InvalidMsg(cmd, _)) => assert_eq!(cmd, "warp_drive"),
            other => panic!("Expected InvalidMsg error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_cmd_rejected() {
        match PanelMsg::from_json("{\"x\": 1.0}") {
            Err(MsgParseError::NoCmdTag) => (),
            other => panic!("Expected NoCmdTag error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_rejected() {
        match PanelMsg::from_json("{\"cmd\": \"status\"") {
            Err(MsgParseError::InvalidJson(_)) => (),
            other => panic!("Expected InvalidJson error, got {:?}", other),
        }
    }
}
