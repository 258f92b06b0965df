//! Seam between the acquisition loop and whatever draws the points. The
//! driver streams one [`ScreenPoint`] at a time; clearing and flushing the
//! frame is the window's business, not the driver's.

use rplidar_data::{Quality, ScreenPoint};

/// Display geometry handed to the acquisition loop: millimeter-to-screen
/// scale and the screen-center origin of the polar projection.
#[derive(Clone, Copy, Debug)]
pub struct DisplayConfig {
    pub scale: f64,
    pub center: (f64, f64),
}

/// Receives decoded points, one per call, during a tick.
pub trait RenderSink {
    fn draw_point(&mut self, point: &ScreenPoint);
}

/// Marker size and RGB color for a point of a given classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointStyle {
    pub size: u32,
    pub color: (u8, u8, u8),
}

impl PointStyle {
    /// Low-quality returns draw larger and in red so a "no reliable return"
    /// direction is visible at a glance; normal returns are small and blue.
    pub fn for_quality(quality: Quality) -> PointStyle {
        match quality {
            Quality::Low => PointStyle {
                size: 7,
                color: (255, 0, 0),
            },
            Quality::Normal => PointStyle {
                size: 3,
                color: (0, 0, 255),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_style_by_quality() {
        let low = PointStyle::for_quality(Quality::Low);
        let normal = PointStyle::for_quality(Quality::Normal);
        assert!(low.size > normal.size);
        assert_eq!(low.color, (255, 0, 0));
        assert_eq!(normal.color, (0, 0, 255));
    }
}
