//! # Implementations for the Readout state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;
use std::sync::Arc;

// Internal
use super::{fk, translate, LinkGeometry, Params, ReadoutError, ReadoutInitError};
use panel_if::{
    axis::Axis,
    msg::StatusMsg,
    offset::{ToolOffset, ToolOffsetTable, WorkOffset, WorkOffsetTable},
};
use util::{
    archive::{Archived, Archiver},
    module::State,
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Readout module state
#[derive(Default)]
pub struct Readout {
    pub(crate) params: Params,

    /// Link geometry derived from the active tool offset. `None` when the
    /// active tool record is missing or unusable, in which case every reduce
    /// fails until a usable table arrives.
    pub(crate) geom: Option<LinkGeometry>,

    /// Current work offset table. Tables are swapped as whole `Arc`s so a
    /// frame is never built from a half-replaced table.
    pub(crate) work_offsets: Arc<WorkOffsetTable>,

    /// Current tool offset table, swapped like `work_offsets`.
    pub(crate) tool_offsets: Arc<ToolOffsetTable>,

    /// Name of the active work offset.
    pub(crate) work_offset: String,

    /// Name of the active tool offset.
    pub(crate) tool_offset: String,

    /// Report for the current cycle.
    pub(crate) report: StatusReport,
    arch_report: Archiver,

    /// The frame built from the last status reduced, which stays on display
    /// over cycles in which no status arrives.
    pub(crate) frame: Option<DisplayFrame>,

    /// True when `frame` was rebuilt by the current cycle's proc. Only fresh
    /// frames are archived, a failed or idle cycle must not re-archive the
    /// frame it kept on display.
    frame_is_fresh: bool,

    arch_frame: Archiver,
}

/// Input data to the Readout module.
#[derive(Debug, Clone, Default)]
pub struct InputData {
    /// The status to reduce this cycle, or `None` if no new status arrived.
    /// When several statuses arrive in one cycle only the last is kept.
    pub status: Option<StatusMsg>,

    /// Session-elapsed time at which this cycle started.
    ///
    /// Units: seconds
    pub time_s: f64,
}

/// A frame of readout values for the panel display.
///
/// Axis values follow the panel's two column convention: `pos` is the value
/// in the operator's work frame, `mpos` the raw machine value. An axis the
/// machine did not report, or which is not configured, is `None` all the way
/// through to the display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayFrame {
    /// Session-elapsed time of the status this frame was built from.
    ///
    /// Units: seconds
    pub time_s: f64,

    /// Machine state, for example "Idle", "Run" or "Hold".
    pub state: String,

    /// Name of the work offset the frame was built with.
    pub work_offset: String,

    /// Name of the tool offset the frame was built with.
    pub tool_offset: String,

    // ---- AXIS READOUTS ----
    pub x_pos: Option<f64>,
    pub x_mpos: Option<f64>,
    pub y_pos: Option<f64>,
    pub y_mpos: Option<f64>,
    pub z_pos: Option<f64>,
    pub z_mpos: Option<f64>,
    pub a_pos: Option<f64>,
    pub a_mpos: Option<f64>,
    pub b_pos: Option<f64>,
    pub b_mpos: Option<f64>,
    pub c_pos: Option<f64>,
    pub c_mpos: Option<f64>,

    // ---- JOINT ENCODERS ----
    /// Shoulder encoder reading, zero if the status carried none.
    ///
    /// Units: degrees
    pub theta_enc_deg: f64,

    /// Elbow encoder reading, zero if the status carried none.
    ///
    /// Units: degrees
    pub phi_enc_deg: f64,

    // ---- CARTESIAN POSE ----
    /// Tip position from the encoders, in the work frame.
    ///
    /// Units: millimetres
    pub cart_x_mm: f64,

    /// Units: millimetres
    pub cart_y_mm: f64,

    /// Corrected Z, mirrored from `z_pos`.
    ///
    /// Units: millimetres
    pub cart_z_mm: Option<f64>,

    /// Tip position from the commanded joint angles, in the work frame.
    /// `None` when the status carried no x or y.
    ///
    /// Units: millimetres
    pub cart_cmd_x_mm: Option<f64>,

    /// Units: millimetres
    pub cart_cmd_y_mm: Option<f64>,

    /// Rotation of the tool relative to the work piece, `None` unless the
    /// status carried a, x and y.
    ///
    /// Units: degrees
    pub tool_rot_deg: Option<f64>,
}

/// Status report for Readout processing.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusReport {
    /// A status arrived without encoder readings and zero was used instead.
    pub enc_defaulted: bool,

    /// The command-derived pose was skipped because the status carried no x
    /// or y.
    pub cart_cmd_skipped: bool,
}

/// A snapshot of the offset configuration, saved at the end of a run.
#[derive(Debug, Clone, Serialize)]
pub struct OffsetSnapshot {
    pub work_offsets: WorkOffsetTable,
    pub work_offset: String,
    pub tool_offsets: ToolOffsetTable,
    pub tool_offset: String,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for Readout {
    type InitData = &'static str;
    type InitError = ReadoutInitError;

    type InputData = InputData;
    type OutputData = DisplayFrame;
    type StatusReport = StatusReport;
    type ProcError = ReadoutError;

    /// Initialise the readout from its parameter file.
    ///
    /// The initial tables and active names come from the parameters. Both
    /// active names must point at records that exist and the tool record
    /// must give a usable link geometry, otherwise initialisation fails.
    fn init(
        &mut self,
        init_data: Self::InitData,
        session: &Session,
    ) -> Result<(), Self::InitError> {
        // Load the parameters
        self.params = params::load(init_data)?;

        self.work_offsets = Arc::new(self.params.work_offsets.clone());
        self.tool_offsets = Arc::new(self.params.tool_offsets.clone());
        self.work_offset = self.params.work_offset.clone();
        self.tool_offset = self.params.tool_offset.clone();

        self.active_work_offset()?;
        self.geom = Some(self.derive_geometry()?);

        // Create the arch folder for the readout
        let mut arch_path = session.arch_root.clone();
        arch_path.push("readout");
        std::fs::create_dir_all(arch_path).unwrap();

        self.arch_frame = Archiver::from_path(session, "readout/display_frame.csv").unwrap();
        self.arch_report = Archiver::from_path(session, "readout/status_report.csv").unwrap();

        Ok(())
    }

    /// Cyclic processing for the readout.
    ///
    /// Reduces the cycle's status message (if one arrived) into a new display
    /// frame. On cycles without a status the previous frame is returned
    /// unchanged, or a default frame if no status has ever arrived.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        // Clear the previous cycle's report and frame freshness
        self.report = StatusReport::default();
        self.frame_is_fresh = false;

        if let Some(ref status) = input_data.status {
            let frame = self.reduce(status, input_data.time_s)?;

            trace!(
                "Readout frame: cart ({:.3}, {:.3}) mm in {}",
                frame.cart_x_mm,
                frame.cart_y_mm,
                frame.work_offset
            );

            self.frame = Some(frame);
            self.frame_is_fresh = true;
        }

        Ok((
            match self.frame {
                Some(ref f) => f.clone(),
                None => DisplayFrame::default(),
            },
            self.report,
        ))
    }
}

impl Readout {
    /// Fold one status message into a display frame.
    fn reduce(&mut self, status: &StatusMsg, time_s: f64) -> Result<DisplayFrame, ReadoutError> {
        // An unusable offset configuration fails the whole reduce, a frame
        // built against the wrong offsets would be worse than none.
        let work = self.active_work_offset()?;
        let tool = self.active_tool_offset()?;

        // Re-derive the geometry if an earlier table push invalidated it
        let geom = match self.geom {
            Some(g) => g,
            None => {
                let g = self.derive_geometry()?;
                self.geom = Some(g);
                g
            }
        };

        let mut frame = DisplayFrame {
            time_s,
            state: status.state.clone(),
            work_offset: self.work_offset.clone(),
            tool_offset: self.tool_offset.clone(),
            ..Default::default()
        };

        // Axis readouts for the configured axes, skipping any the status
        // does not carry. X and Y are joint angles so only Y, Z carry
        // offset corrections, the rest read out raw.
        let z_correction = self.params.z_correction;
        for axis in self.params.axes.iter() {
            let raw = status.axis(*axis);

            let pos = match axis {
                Axis::Y => raw.map(|y| y - tool.p),
                Axis::Z => raw.map(|z| z_correction.apply(z, work.z, tool.z)),
                _ => raw,
            };

            frame.set_axis(*axis, pos, raw);
        }

        // Missing encoder readings read as zero
        if status.theta_enc.is_none() || status.phi_enc.is_none() {
            self.report.enc_defaulted = true;
        }
        frame.theta_enc_deg = status.theta_enc.unwrap_or(0.0);
        frame.phi_enc_deg = status.phi_enc.unwrap_or(0.0);

        // Tip pose from the encoders, mapped into the work frame
        let cart = translate(fk(&geom, frame.theta_enc_deg, frame.phi_enc_deg)?, &work);
        frame.cart_x_mm = cart.x_mm;
        frame.cart_y_mm = cart.y_mm;
        frame.cart_z_mm = frame.z_pos;

        // Tip pose from the commanded joint angles, with the tool's Y
        // correction removed before the solve
        match (status.x, status.y) {
            (Some(x), Some(y)) => {
                let cmd = translate(fk(&geom, x, y - tool.p)?, &work);
                frame.cart_cmd_x_mm = Some(cmd.x_mm);
                frame.cart_cmd_y_mm = Some(cmd.y_mm);
            }
            _ => self.report.cart_cmd_skipped = true,
        }

        // Tool rotation relative to the work piece. Both joints rotate the
        // tool with them, so their angles come off the rotary axis.
        if let (Some(a), Some(x), Some(y)) = (status.a, status.x, status.y) {
            frame.tool_rot_deg = Some(a - x - y);
        }

        Ok(frame)
    }

    /// Select the active work offset by name.
    ///
    /// Selections are checked against the current table, an unknown name is
    /// rejected and the previous selection stays active.
    pub fn select_work_offset(&mut self, name: &str) -> Result<(), ReadoutError> {
        if !self.work_offsets.contains_key(name) {
            return Err(ReadoutError::WorkOffsetNotFound(name.to_string()));
        }

        self.work_offset = name.to_string();
        Ok(())
    }

    /// Select the active tool offset by name, re-deriving the link geometry
    /// from the newly selected record.
    ///
    /// An unknown name is rejected and the previous selection stays active.
    /// A known name is always applied, but if its record gives no usable
    /// geometry the error is returned and reduces fail until a usable table
    /// arrives.
    pub fn select_tool_offset(&mut self, name: &str) -> Result<(), ReadoutError> {
        if !self.tool_offsets.contains_key(name) {
            return Err(ReadoutError::ToolOffsetNotFound(name.to_string()));
        }

        self.tool_offset = name.to_string();

        match self.derive_geometry() {
            Ok(g) => {
                self.geom = Some(g);
                Ok(())
            }
            Err(e) => {
                self.geom = None;
                Err(e)
            }
        }
    }

    /// Replace the work offset table wholesale.
    ///
    /// The backend owns the tables so a push always applies, even one that
    /// drops the active record. That case surfaces as an error on the next
    /// reduce.
    pub fn replace_work_offsets(&mut self, table: WorkOffsetTable) {
        self.work_offsets = Arc::new(table);
    }

    /// Replace the tool offset table wholesale and re-derive the link
    /// geometry from the active record.
    ///
    /// The push always applies. If the new table has no usable record for
    /// the active name the geometry is invalidated and the error returned,
    /// and reduces fail until a usable table arrives.
    pub fn replace_tool_offsets(&mut self, table: ToolOffsetTable) -> Result<(), ReadoutError> {
        self.tool_offsets = Arc::new(table);

        match self.derive_geometry() {
            Ok(g) => {
                self.geom = Some(g);
                Ok(())
            }
            Err(e) => {
                self.geom = None;
                Err(e)
            }
        }
    }

    /// Snapshot the offset tables and active names as they stand.
    pub fn offset_snapshot(&self) -> OffsetSnapshot {
        OffsetSnapshot {
            work_offsets: (*self.work_offsets).clone(),
            work_offset: self.work_offset.clone(),
            tool_offsets: (*self.tool_offsets).clone(),
            tool_offset: self.tool_offset.clone(),
        }
    }

    /// Look up the active work offset record.
    fn active_work_offset(&self) -> Result<WorkOffset, ReadoutError> {
        match self.work_offsets.get(&self.work_offset) {
            Some(w) => Ok(*w),
            None => Err(ReadoutError::WorkOffsetNotFound(self.work_offset.clone())),
        }
    }

    /// Look up the active tool offset record.
    fn active_tool_offset(&self) -> Result<ToolOffset, ReadoutError> {
        match self.tool_offsets.get(&self.tool_offset) {
            Some(t) => Ok(*t),
            None => Err(ReadoutError::ToolOffsetNotFound(self.tool_offset.clone())),
        }
    }

    /// Build the link geometry from the shoulder length parameter and the
    /// active tool offset's elbow length.
    fn derive_geometry(&self) -> Result<LinkGeometry, ReadoutError> {
        let tool = self.active_tool_offset()?;

        LinkGeometry::new(self.params.theta_len_mm, tool.l)
    }
}

impl DisplayFrame {
    /// Set the work and machine readouts for one axis.
    fn set_axis(&mut self, axis: Axis, pos: Option<f64>, mpos: Option<f64>) {
        match axis {
            Axis::X => {
                self.x_pos = pos;
                self.x_mpos = mpos;
            }
            Axis::Y => {
                self.y_pos = pos;
                self.y_mpos = mpos;
            }
            Axis::Z => {
                self.z_pos = pos;
                self.z_mpos = mpos;
            }
            Axis::A => {
                self.a_pos = pos;
                self.a_mpos = mpos;
            }
            Axis::B => {
                self.b_pos = pos;
                self.b_mpos = mpos;
            }
            Axis::C => {
                self.c_pos = pos;
                self.c_mpos = mpos;
            }
        }
    }
}

impl Archived for Readout {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        // Only cycles that reduced a fresh status add rows. A failed or
        // idle cycle still holds the previous frame, and that one has a
        // row already.
        if !self.frame_is_fresh {
            return Ok(());
        }

        if let Some(ref frame) = self.frame {
            self.arch_frame.serialise(frame)?;
            self.arch_report.serialise(self.report)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::readout::ZCorrectionMode;

    /// A readout over 100/80 mm links with x, y, z, a axes, an identity G54
    /// and a shifted G55, and a neutral T1 and correcting T2.
    fn test_readout(z_correction: ZCorrectionMode) -> Readout {
        let mut work_offsets = WorkOffsetTable::new();
        work_offsets.insert(
            "G54".to_string(),
            WorkOffset {
                x: 0.0,
                y: 0.0,
                z: 0.0,
                a: 0.0,
            },
        );
        work_offsets.insert(
            "G55".to_string(),
            WorkOffset {
                x: 10.0,
                y: 5.0,
                z: 2.0,
                a: 0.0,
            },
        );

        let mut tool_offsets = ToolOffsetTable::new();
        tool_offsets.insert(
            "T1".to_string(),
            ToolOffset {
                p: 0.0,
                l: 80.0,
                z: 0.0,
            },
        );
        tool_offsets.insert(
            "T2".to_string(),
            ToolOffset {
                p: 1.5,
                l: 65.0,
                z: -3.2,
            },
        );

        let params = Params {
            theta_len_mm: 100.0,
            axes: vec![Axis::X, Axis::Y, Axis::Z, Axis::A],
            z_correction,
            work_offsets,
            work_offset: "G54".to_string(),
            tool_offsets,
            tool_offset: "T1".to_string(),
        };

        let mut readout = Readout {
            work_offsets: Arc::new(params.work_offsets.clone()),
            tool_offsets: Arc::new(params.tool_offsets.clone()),
            work_offset: params.work_offset.clone(),
            tool_offset: params.tool_offset.clone(),
            params,
            ..Default::default()
        };
        readout.geom = Some(readout.derive_geometry().unwrap());

        readout
    }

    fn full_status() -> StatusMsg {
        StatusMsg {
            x: Some(0.0),
            y: Some(0.0),
            z: Some(1.0),
            a: Some(2.0),
            b: None,
            c: None,
            theta_enc: Some(0.0),
            phi_enc: Some(90.0),
            state: "Run".to_string(),
        }
    }

    fn proc_one(readout: &mut Readout, status: StatusMsg) -> (DisplayFrame, StatusReport) {
        readout
            .proc(&InputData {
                status: Some(status),
                time_s: 0.0,
            })
            .unwrap()
    }

    #[test]
    fn test_full_status_frame() {
        let mut readout = test_readout(ZCorrectionMode::LegacyAdditiveTool);

        let (frame, report) = proc_one(&mut readout, full_status());

        // Identity offsets, so work and machine columns agree
        assert_eq!(frame.x_pos, Some(0.0));
        assert_eq!(frame.x_mpos, Some(0.0));
        assert_eq!(frame.y_pos, Some(0.0));
        assert_eq!(frame.z_pos, Some(1.0));
        assert_eq!(frame.a_pos, Some(2.0));
        assert_eq!(frame.b_pos, None);

        // Encoders at (0, 90) put the tip at (80, -100)
        assert!((frame.cart_x_mm - 80.0).abs() < 1e-9);
        assert!((frame.cart_y_mm + 100.0).abs() < 1e-9);
        assert_eq!(frame.cart_z_mm, Some(1.0));

        // Commanded joints at (0, 0) put the commanded tip at full reach
        assert!((frame.cart_cmd_x_mm.unwrap() - 0.0).abs() < 1e-9);
        assert!((frame.cart_cmd_y_mm.unwrap() + 180.0).abs() < 1e-9);

        // a - x - y
        assert_eq!(frame.tool_rot_deg, Some(2.0));

        assert_eq!(frame.state, "Run");
        assert_eq!(frame.work_offset, "G54");
        assert_eq!(frame.tool_offset, "T1");

        assert!(!report.enc_defaulted);
        assert!(!report.cart_cmd_skipped);
    }

    #[test]
    fn test_work_offset_shifts_pose() {
        let mut readout = test_readout(ZCorrectionMode::LegacyAdditiveTool);
        readout.select_work_offset("G55").unwrap();

        let (frame, _) = proc_one(&mut readout, full_status());

        // G55 is unrotated so the shift is an exact subtraction
        assert!((frame.cart_x_mm - 70.0).abs() < 1e-9);
        assert!((frame.cart_y_mm + 105.0).abs() < 1e-9);

        // Z picks up the work offset's z: 1.0 - 2.0 + 0.0
        assert_eq!(frame.z_pos, Some(-1.0));
        assert_eq!(frame.z_mpos, Some(1.0));
        assert_eq!(frame.work_offset, "G55");
    }

    #[test]
    fn test_z_correction_mode_selects_formula() {
        for (mode, expected) in &[
            (ZCorrectionMode::LegacyAdditiveTool, 10.0 - 2.0 + -3.2),
            (ZCorrectionMode::SubtractTool, 10.0 - 2.0 - -3.2),
        ] {
            let mut readout = test_readout(*mode);
            readout.select_work_offset("G55").unwrap();
            readout.select_tool_offset("T2").unwrap();

            let mut status = full_status();
            status.z = Some(10.0);

            let (frame, _) = proc_one(&mut readout, status);

            assert_eq!(frame.z_pos, Some(*expected));
        }
    }

    #[test]
    fn test_tool_offset_changes_geometry() {
        let mut readout = test_readout(ZCorrectionMode::LegacyAdditiveTool);
        readout.select_tool_offset("T2").unwrap();

        assert_eq!(readout.geom.unwrap().phi_len_mm(), 65.0);

        let mut status = full_status();
        status.y = Some(10.0);

        let (frame, _) = proc_one(&mut readout, status);

        // T2's p correction comes off the commanded Y
        assert_eq!(frame.y_pos, Some(8.5));
        assert_eq!(frame.y_mpos, Some(10.0));

        // Encoders at (0, 90) over 100/65 links: tip at (65, -100)
        assert!((frame.cart_x_mm - 65.0).abs() < 1e-9);
        assert!((frame.cart_y_mm + 100.0).abs() < 1e-9);
        assert_eq!(frame.tool_offset, "T2");
    }

    #[test]
    fn test_unknown_selection_rejected() {
        let mut readout = test_readout(ZCorrectionMode::LegacyAdditiveTool);

        assert!(matches!(
            readout.select_work_offset("G59"),
            Err(ReadoutError::WorkOffsetNotFound(_))
        ));
        assert!(matches!(
            readout.select_tool_offset("T9"),
            Err(ReadoutError::ToolOffsetNotFound(_))
        ));

        // The previous selections stay active and reduces keep working
        assert_eq!(readout.work_offset, "G54");
        assert_eq!(readout.tool_offset, "T1");
        proc_one(&mut readout, full_status());
    }

    #[test]
    fn test_table_push_dropping_active_fails_reduce() {
        let mut readout = test_readout(ZCorrectionMode::LegacyAdditiveTool);

        // A push without the active T1 applies but reports the problem
        let mut table = ToolOffsetTable::new();
        table.insert(
            "T5".to_string(),
            ToolOffset {
                p: 0.0,
                l: 70.0,
                z: 0.0,
            },
        );
        assert!(matches!(
            readout.replace_tool_offsets(table),
            Err(ReadoutError::ToolOffsetNotFound(_))
        ));
        assert!(readout.tool_offsets.contains_key("T5"));

        // Reduces fail fast while the configuration is unusable
        let result = readout.proc(&InputData {
            status: Some(full_status()),
            time_s: 0.0,
        });
        assert!(matches!(
            result,
            Err(ReadoutError::ToolOffsetNotFound(_))
        ));

        // A table carrying the active record again heals the readout
        let mut table = ToolOffsetTable::new();
        table.insert(
            "T1".to_string(),
            ToolOffset {
                p: 0.0,
                l: 80.0,
                z: 0.0,
            },
        );
        readout.replace_tool_offsets(table).unwrap();
        proc_one(&mut readout, full_status());
    }

    #[test]
    fn test_work_table_push_always_applies() {
        let mut readout = test_readout(ZCorrectionMode::LegacyAdditiveTool);

        let mut table = WorkOffsetTable::new();
        table.insert("G59".to_string(), WorkOffset::default());
        readout.replace_work_offsets(table);

        // The active G54 is gone, so the next reduce fails
        let result = readout.proc(&InputData {
            status: Some(full_status()),
            time_s: 0.0,
        });
        assert!(matches!(
            result,
            Err(ReadoutError::WorkOffsetNotFound(_))
        ));

        // Selecting a record the new table does carry recovers
        readout.select_work_offset("G59").unwrap();
        proc_one(&mut readout, full_status());
    }

    #[test]
    fn test_missing_encoders_default_and_flag() {
        let mut readout = test_readout(ZCorrectionMode::LegacyAdditiveTool);

        let mut status = full_status();
        status.theta_enc = None;
        status.phi_enc = None;

        let (frame, report) = proc_one(&mut readout, status);

        assert!(report.enc_defaulted);
        assert_eq!(frame.theta_enc_deg, 0.0);
        assert_eq!(frame.phi_enc_deg, 0.0);

        // Zero angles solve to full extension
        assert_eq!(frame.cart_x_mm, 0.0);
        assert_eq!(frame.cart_y_mm, -180.0);
    }

    #[test]
    fn test_missing_axes_skip_cmd_pose() {
        let mut readout = test_readout(ZCorrectionMode::LegacyAdditiveTool);

        let status = StatusMsg {
            x: Some(5.0),
            theta_enc: Some(0.0),
            phi_enc: Some(90.0),
            state: "Hold".to_string(),
            ..Default::default()
        };

        let (frame, report) = proc_one(&mut readout, status);

        assert_eq!(frame.x_pos, Some(5.0));
        assert_eq!(frame.y_pos, None);
        assert_eq!(frame.z_pos, None);
        assert_eq!(frame.cart_z_mm, None);
        assert_eq!(frame.tool_rot_deg, None);

        // The encoder pose is still there, the commanded one is not
        assert!((frame.cart_x_mm - 80.0).abs() < 1e-9);
        assert_eq!(frame.cart_cmd_x_mm, None);
        assert!(report.cart_cmd_skipped);
        assert!(!report.enc_defaulted);
    }

    #[test]
    fn test_unconfigured_axis_ignored() {
        let mut readout = test_readout(ZCorrectionMode::LegacyAdditiveTool);
        readout.params.axes = vec![Axis::X, Axis::Y];

        let mut status = full_status();
        status.b = Some(5.0);

        let (frame, _) = proc_one(&mut readout, status);

        // b is reported but not configured, z is configured out too
        assert_eq!(frame.b_pos, None);
        assert_eq!(frame.b_mpos, None);
        assert_eq!(frame.z_pos, None);
        assert_eq!(frame.x_pos, Some(0.0));
    }

    #[test]
    fn test_frame_persists_without_status() {
        let mut readout = test_readout(ZCorrectionMode::LegacyAdditiveTool);

        let (first, _) = proc_one(&mut readout, full_status());

        // A cycle without a status returns the previous frame unchanged
        let (second, report) = readout
            .proc(&InputData {
                status: None,
                time_s: 99.0,
            })
            .unwrap();

        assert_eq!(first, second);
        assert!(!report.enc_defaulted);
    }

    #[test]
    fn test_only_fresh_frames_archived() {
        let mut readout = test_readout(ZCorrectionMode::LegacyAdditiveTool);

        // A reduced status marks the held frame as fresh
        proc_one(&mut readout, full_status());
        assert!(readout.frame_is_fresh);

        // Drop the active work offset so the next reduce fails. The held
        // frame is stale now and write() must leave the archives alone,
        // serialising through the unattached writers here would panic.
        readout.replace_work_offsets(WorkOffsetTable::new());
        assert!(readout
            .proc(&InputData {
                status: Some(full_status()),
                time_s: 1.0,
            })
            .is_err());
        assert!(!readout.frame_is_fresh);
        readout.write().unwrap();

        // A cycle without a status keeps the frame on display but stale
        readout
            .proc(&InputData {
                status: None,
                time_s: 2.0,
            })
            .unwrap();
        assert!(!readout.frame_is_fresh);
        readout.write().unwrap();

        // A table carrying the active record again heals the readout and
        // rows flow again
        let mut table = WorkOffsetTable::new();
        table.insert("G54".to_string(), WorkOffset::default());
        readout.replace_work_offsets(table);
        proc_one(&mut readout, full_status());
        assert!(readout.frame_is_fresh);
    }

    #[test]
    fn test_no_status_ever_gives_default_frame() {
        let mut readout = test_readout(ZCorrectionMode::LegacyAdditiveTool);

        let (frame, _) = readout
            .proc(&InputData {
                status: None,
                time_s: 0.0,
            })
            .unwrap();

        assert_eq!(frame, DisplayFrame::default());
    }

    #[test]
    fn test_offset_snapshot_follows_changes() {
        let mut readout = test_readout(ZCorrectionMode::LegacyAdditiveTool);
        readout.select_work_offset("G55").unwrap();

        let snapshot = readout.offset_snapshot();

        assert_eq!(snapshot.work_offset, "G55");
        assert_eq!(snapshot.tool_offset, "T1");
        assert_eq!(snapshot.work_offsets.len(), 2);
        assert_eq!(snapshot.tool_offsets["T2"].l, 65.0);
    }
}
