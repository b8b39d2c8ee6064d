//! # Panel command composer
//!
//! Builds the bus JSON form of an outbound panel command from command line
//! arguments and prints it on stdout, for driving a backend by hand:
//!
//! ```text
//! panel_cmd move --x 12.5 --f 800
//! panel_cmd change-work-offset G55
//! panel_cmd machine get "$GCode/Offsets"
//! ```

use panel_if::cmd::PanelCmd;
use structopt::StructOpt;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cmd = PanelCmd::from_args();

    println!("{}", cmd.to_json()?);

    Ok(())
}
