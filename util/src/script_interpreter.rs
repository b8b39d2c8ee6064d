//! # Panel script interpreter module
//!
//! This module provides an interpreter for timed panel message scripts,
//! allowing bus messages to be replayed into the exec without a live machine
//! connection.
//!
//! Scripts contain one message per line in the format `<time>: <json>;`,
//! where `<time>` is the number of seconds after session start at which the
//! message shall be delivered, for example:
//!
//! ```text
//! 1.0: {"cmd": "status", "x": 0.0, "state": "Idle"};
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use crate::session::get_elapsed_seconds;
use panel_if::msg::{MsgParseError, PanelMsg};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A message which is scripted to be delivered at a specific time.
struct ScriptedMsg {
    /// The time the message is supposed to be delivered at
    delivery_time_s: f64,

    /// The message itself
    msg: PanelMsg
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use
/// `.get_pending_msgs` to acquire a list of messages that are due for
/// delivery.
pub struct ScriptInterpreter {
    msgs: VecDeque<ScriptedMsg>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0}")]
    ScriptNotFound(String),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid message at {0} s: {1}")]
    InvalidMsg(f64, MsgParseError)
}

pub enum PendingMsgs {
    None,
    Some(Vec<PanelMsg>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Check that the script file exists.
        if !script_path.as_ref().exists() {
            return Err(ScriptError::ScriptNotFound(
                format!("{}", script_path.as_ref().display())));
        }

        // Load the script into a string
        let script = match fs::read_to_string(script_path) {
            Ok(s) => s,
            Err(e) => return Err(ScriptError::ScriptLoadError(e))
        };

        Self::from_str(&script)
    }

    /// Create a new interpreter from the script text itself.
    pub fn from_str(script: &str) -> Result<Self, ScriptError> {

        // Empty queue of messages
        let mut msg_queue: VecDeque<ScriptedMsg> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .unwrap();

        let mut num_caps = 0;

        for cap in re.captures_iter(script) {
            // Parse the delivery time
            let delivery_time_s: f64 = match cap.get(1).unwrap().as_str().parse() {
                Ok(t) => t,
                Err(e) => return Err(
                    ScriptError::InvalidTimestamp(format!("{}", e)))
            };

            // Parse the message from the payload. The scripts contain JSON
            // only.
            let msg = match PanelMsg::from_json(
                cap.get(3).unwrap().as_str())
            {
                Ok(m) => m,
                Err(e) => return Err(ScriptError::InvalidMsg(
                    delivery_time_s, e
                ))
            };

            // Build the scripted message from the match
            msg_queue.push_back(ScriptedMsg {
                delivery_time_s,
                msg
            });

            num_caps += 1;
        }

        if num_caps == 0 {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            msgs: msg_queue
        })
    }

    /// Return a vector of pending messages, or `None` if no messages are due
    /// for delivery now.
    pub fn get_pending_msgs(&mut self) -> PendingMsgs {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.msgs.len() == 0 {
            return PendingMsgs::EndOfScript
        }

        let mut msg_vec: Vec<PanelMsg> = vec![];

        let current_time_s = get_elapsed_seconds();

        // Peek items from the queue, if the head's delivery time is lower
        // than the current time add it to the vector, and keep adding
        // messages until the delivery times are larger than the current time.
        while
            self.msgs.len() > 0
            &&
            self.msgs.front().unwrap().delivery_time_s < current_time_s
        {
            msg_vec.push(self.msgs.pop_front().unwrap().msg);
        }

        // If the vector is longer than 0 return Some, otherwise None
        if msg_vec.len() > 0 {
            PendingMsgs::Some(msg_vec)
        }
        else {
            PendingMsgs::None
        }
    }

    /// Get the number of messages remaining in the script
    pub fn get_num_msgs(&self) -> usize {
        self.msgs.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.msgs.back() {
            Some(m) => m.delivery_time_s,
            None => 0f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_valid_script_parsed() {
        let si = ScriptInterpreter::from_str(
            "0.5: {\"cmd\": \"change_work_offset\", \"data\": \"G55\"};\n\
             2.0: {\"cmd\": \"status\", \"x\": 1.5, \"theta_enc\": 10.0, \
             \"phi_enc\": 90.0, \"state\": \"Run\"};\n"
        ).unwrap();

        assert_eq!(si.get_num_msgs(), 2);
        assert_eq!(si.get_duration(), 2.0);
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        let si = ScriptInterpreter::from_str(
            "# hand written demo\n\
             \n\
             1.0: {\"cmd\": \"post\", \"data\": \"hello\"};\n"
        ).unwrap();

        assert_eq!(si.get_num_msgs(), 1);
        assert_eq!(si.get_duration(), 1.0);
    }

    #[test]
    fn test_empty_script_rejected() {
        match ScriptInterpreter::from_str("not a script at all") {
            Err(ScriptError::ScriptEmpty) => (),
            _ => panic!("expected ScriptEmpty")
        }
    }

    #[test]
    fn test_invalid_message_rejected() {
        match ScriptInterpreter::from_str("1.0: {\"cmd\": \"warp_drive\"};") {
            Err(ScriptError::InvalidMsg(t, _)) => assert_eq!(t, 1.0),
            _ => panic!("expected InvalidMsg")
        }
    }
}
