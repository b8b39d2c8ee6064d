//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Arccosine with the argument clamped into [-1, 1].
///
/// Floating point noise can push a value which is mathematically within the
/// domain fractionally outside it, which would give NaN. Arguments far
/// outside the domain are clamped all the same, callers that care about that
/// case must check before calling.
pub fn acos_clamped<T>(value: T) -> T
where
    T: Float
{
    let one = T::from(1.0).unwrap();

    if value > one {
        return T::from(0.0).unwrap();
    }
    if value < -one {
        return T::from(std::f64::consts::PI).unwrap();
    }

    value.acos()
}

/// Convert cartesian coordinates into polar form `(radius, angle)`.
///
/// The angle is measured anticlockwise from the +x axis, in radians.
pub fn to_polar<T>(x: T, y: T) -> (T, T)
where
    T: Float
{
    (x.hypot(y), y.atan2(x))
}

/// Convert polar form `(radius, angle)` coordinates into cartesian `(x, y)`.
pub fn from_polar<T>(radius: T, angle: T) -> (T, T)
where
    T: Float
{
    (angle.cos() * radius, angle.sin() * radius)
}
