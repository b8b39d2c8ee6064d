//! # Forward kinematics for the two-link arm
//!
//! Recovers the cartesian position of the arm tip from the two joint angles
//! using the law of cosines, set out in the arm's local frame.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;
use std::f64::consts::PI;

// Internal
use super::ReadoutError;
use util::maths::acos_clamped;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Base-to-tip distance below which the pose is treated as exactly the
/// origin.
///
/// As the arm folds fully back on itself the base angle becomes undefined
/// (`acos` of 0/0), but the tip position scales with the base-to-tip
/// distance, so its limit is the origin. Returning the origin keeps that
/// discontinuity out of the output.
///
/// Units: millimetres
pub const DEGENERATE_REACH_MM: f64 = 1e-9;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A position of the arm tip in a cartesian frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CartPos {
    /// Units: millimetres
    pub x_mm: f64,

    /// Units: millimetres
    pub y_mm: f64,
}

/// The two link lengths of the arm, with their squares cached for the
/// solver.
///
/// The first (shoulder) link length is a machine constant. The second
/// (elbow) link length comes from the active tool offset and changes when
/// the tool changes.
#[derive(Debug, Clone, Copy)]
pub struct LinkGeometry {
    theta_len_mm: f64,
    phi_len_mm: f64,
    theta_2_mm2: f64,
    phi_2_mm2: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LinkGeometry {
    /// Build the geometry from the two link lengths.
    ///
    /// Units: millimetres
    pub fn new(theta_len_mm: f64, phi_len_mm: f64) -> Result<Self, ReadoutError> {
        // Zero or negative lengths make the solver produce angles from
        // degenerate triangles, reject them up front.
        if !theta_len_mm.is_finite()
            || !phi_len_mm.is_finite()
            || theta_len_mm <= 0.0
            || phi_len_mm <= 0.0
        {
            return Err(ReadoutError::InvalidLinkGeometry(theta_len_mm, phi_len_mm));
        }

        Ok(LinkGeometry {
            theta_len_mm,
            phi_len_mm,
            theta_2_mm2: theta_len_mm * theta_len_mm,
            phi_2_mm2: phi_len_mm * phi_len_mm,
        })
    }

    /// Length of the first (shoulder) link.
    ///
    /// Units: millimetres
    pub fn theta_len_mm(&self) -> f64 {
        self.theta_len_mm
    }

    /// Length of the second (elbow) link.
    ///
    /// Units: millimetres
    pub fn phi_len_mm(&self) -> f64 {
        self.phi_len_mm
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Solve the forward kinematics of the two-link arm.
///
/// Takes the shoulder (`theta`) and elbow (`phi`) joint angles in degrees and
/// returns the tip position in the arm's local frame. The local frame is
/// rotated a quarter turn from the usual maths convention: with both joints
/// at zero the arm points along negative Y, so the tip sits at
/// `(0, -(theta_len + phi_len))`.
///
/// The solve runs through the law of cosines. The base-to-tip distance `c`
/// follows from the two link lengths and the elbow angle, the angle `B`
/// between the first link and the line to the tip follows from the triangle's
/// three sides, and the tip lies at angle `theta + B` and distance `c` from
/// the base.
pub fn fk(geom: &LinkGeometry, theta_deg: f64, phi_deg: f64) -> Result<CartPos, ReadoutError> {
    if !theta_deg.is_finite() || !phi_deg.is_finite() {
        return Err(ReadoutError::NonFiniteAngles(theta_deg, phi_deg));
    }

    let theta = theta_deg.to_radians();
    let phi = phi_deg.to_radians();

    // Square of the base-to-tip distance. Exact arithmetic keeps this
    // non-negative, floating point may not, hence the clamp.
    let c2 = (geom.theta_2_mm2 + geom.phi_2_mm2
        - 2.0 * geom.theta_len_mm * geom.phi_len_mm * (PI - phi).cos())
    .max(0.0);
    let c = c2.sqrt();

    // Arm folded fully back on itself, the tip is at the base
    if c < DEGENERATE_REACH_MM {
        return Ok(CartPos {
            x_mm: 0.0,
            y_mm: 0.0,
        });
    }

    // Angle between the first link and the base-to-tip line. The argument
    // can drift just outside [-1, 1] at the reach limits.
    let b = acos_clamped((c2 + geom.theta_2_mm2 - geom.phi_2_mm2) / (2.0 * c * geom.theta_len_mm));

    let tip = theta + b;

    Ok(CartPos {
        x_mm: tip.sin() * c,
        y_mm: -tip.cos() * c,
    })
}
