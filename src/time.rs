/// This library uses a continuous time model: all task parameters and
/// analysis results are non-negative reals.
pub type Time = f64;

/// Syntactic sugar to give a hint that a value denotes a share of the
/// accelerator's capacity, in `(0, 1]`.
pub type Fraction = f64;

use crate::config::EPSILON;

/// Ceiling of a computed quantity, compensated for floating-point
/// drift: a value that undershoots an integer by less than [EPSILON]
/// is treated as having reached it. Clamped to zero from below.
pub fn ceil_comp(x: Time) -> Time {
    (x - EPSILON).ceil().max(0.0)
}

/// Floor of a computed quantity, compensated for floating-point
/// drift: a value that overshoots an integer by less than [EPSILON]
/// is treated as having reached it. Clamped to zero from below.
pub fn floor_comp(x: Time) -> Time {
    (x + EPSILON).floor().max(0.0)
}
