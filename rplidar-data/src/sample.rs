#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One raw measurement pulled from the sensor, in the device's fixed-point
/// wire units. Consumed once per render tick and discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawSample {
    /// Angle in q14 units over a 90 degree base: degrees = code * 90 / 2^14.
    /// A full revolution spans the u16 range exactly, so angle arithmetic
    /// wraps instead of clamping.
    pub angle_z_q14: u16,
    /// Distance in quarter millimeters (q2 fixed point).
    pub dist_mm_q2: u32,
    /// Return quality. Zero means no reliable return.
    pub quality: u8,
}

/// Display classification of a sample's return quality.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Quality {
    /// Quality code of exactly zero: marginal, no reliable return.
    Low,
    Normal,
}

/// A decoded sample: angle in radians, distance in display units.
///
/// Invariant: `angle_radian` is in `[0, 2*pi)` and `distance` is
/// non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolarPoint {
    pub angle_radian: f64,
    pub distance: f64,
    pub quality: Quality,
}

/// A point projected into screen space relative to the display origin.
/// Derived deterministically from a [`PolarPoint`]; never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub quality: Quality,
}
