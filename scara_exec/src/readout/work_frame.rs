//! # Work offset transform
//!
//! Maps positions in the arm's local frame into the operator's work frame.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use panel_if::offset::WorkOffset;

// Internal
use super::CartPos;
use util::maths::{from_polar, to_polar};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Transform a position in the arm's local frame into the work frame.
///
/// Rotates the position about the machine origin by the offset's `a`, then
/// subtracts the offset's translation. The order matters: the offset records
/// where the work origin sits in the machine frame, so the rotation must be
/// applied while the position is still centred on the machine origin.
/// Existing offset tables encode this convention.
pub fn translate(pos: CartPos, work: &WorkOffset) -> CartPos {
    // An unrotated offset must not disturb the position at all, so skip the
    // polar round trip
    let (x_mm, y_mm) = if work.a == 0.0 {
        (pos.x_mm, pos.y_mm)
    } else {
        let (radius, angle) = to_polar(pos.x_mm, pos.y_mm);
        from_polar(radius, angle + work.a)
    };

    CartPos {
        x_mm: x_mm - work.x,
        y_mm: y_mm - work.y,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_identity_offset_is_noop() {
        let pos = CartPos {
            x_mm: 80.1,
            y_mm: -99.9,
        };

        assert_eq!(translate(pos, &WorkOffset::default()), pos);
    }

    #[test]
    fn test_unrotated_offset_is_exact() {
        // With a = 0 the transform is two subtractions and nothing else, so
        // the result must be bitwise exact
        let pos = CartPos {
            x_mm: 80.1,
            y_mm: -99.9,
        };
        let work = WorkOffset {
            x: 10.0,
            y: 5.0,
            z: 2.0,
            a: 0.0,
        };

        let out = translate(pos, &work);

        assert_eq!(out.x_mm, 80.1 - 10.0);
        assert_eq!(out.y_mm, -99.9 - 5.0);
    }

    #[test]
    fn test_rotation_applied_before_translation() {
        // A quarter turn carries (1, 0) onto (0, 1), then the translation
        // pulls it back to the work origin
        let pos = CartPos {
            x_mm: 1.0,
            y_mm: 0.0,
        };
        let work = WorkOffset {
            x: 0.0,
            y: 1.0,
            z: 0.0,
            a: std::f64::consts::FRAC_PI_2,
        };

        let out = translate(pos, &work);

        assert!(out.x_mm.abs() < 1e-12);
        assert!(out.y_mm.abs() < 1e-12);
    }

    #[test]
    fn test_inverse_offset_round_trip() {
        let pos = CartPos {
            x_mm: 80.1,
            y_mm: -99.9,
        };
        let work = WorkOffset {
            x: 12.5,
            y: -3.0,
            z: 0.0,
            a: 0.5,
        };

        let out = translate(pos, &work);

        // Undo by hand: add the translation back, then rotate by the
        // opposite angle
        let undone = translate(
            CartPos {
                x_mm: out.x_mm + work.x,
                y_mm: out.y_mm + work.y,
            },
            &WorkOffset {
                x: 0.0,
                y: 0.0,
                z: 0.0,
                a: -work.a,
            },
        );

        assert!((undone.x_mm - pos.x_mm).abs() < 1e-9);
        assert!((undone.y_mm - pos.y_mm).abs() < 1e-9);
    }
}
