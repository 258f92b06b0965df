//! Pure fixed-point decoding of raw sensor samples, and the polar to screen
//! projection. No side effects, no failure modes: every sample decodes to a
//! point.

use rplidar_data::{PolarPoint, Quality, RawSample, ScreenPoint};

/// One angular step of the q14 angle code, in degrees.
const ANGLE_STEP_DEGREES: f64 = 90.0 / ((1 << 14) as f64);

/// Decode the q14 angle code into radians in `[0, 2*pi)`.
///
/// The sweep is mirrored (`360 - degrees`) so that an increasing raw angle
/// rotates the same way on screen as the physical scan head. The mirror is
/// applied modulo 360, never clamped, so the 0/360 boundary stays
/// continuous.
pub fn angle_radians(angle_z_q14: u16) -> f64 {
    let degrees = (angle_z_q14 as f64) * ANGLE_STEP_DEGREES;
    ((360.0 - degrees).rem_euclid(360.0)).to_radians()
}

/// Decode the q2 distance code (quarter millimeters) into display units.
pub fn distance_display_units(dist_mm_q2: u32, scale: f64) -> f64 {
    (dist_mm_q2 as f64) / 4.0 * scale
}

/// A quality code of exactly zero means the device saw no reliable return.
pub fn classify(quality: u8) -> Quality {
    if quality == 0 {
        Quality::Low
    } else {
        Quality::Normal
    }
}

pub fn decode(sample: &RawSample, scale: f64) -> PolarPoint {
    PolarPoint {
        angle_radian: angle_radians(sample.angle_z_q14),
        distance: distance_display_units(sample.dist_mm_q2, scale),
        quality: classify(sample.quality),
    }
}

/// Project a decoded point into screen space about the display origin.
pub fn project(point: &PolarPoint, center: (f64, f64)) -> ScreenPoint {
    ScreenPoint {
        x: point.distance * point.angle_radian.cos() + center.0,
        y: point.distance * point.angle_radian.sin() + center.1,
        quality: point.quality,
    }
}
