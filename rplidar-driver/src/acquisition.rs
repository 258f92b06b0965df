//! Per-tick scan acquisition: pull whatever measurement bytes the device
//! has produced, frame them into nodes, order them by angle and stream the
//! decoded points to the render sink.

use crate::constants::{MAX_SCAN_NODES, SCAN_NODE_SIZE};
use crate::decode::{decode, project};
use crate::device::RplidarDevice;
use crate::protocol::{is_scan_node, parse_scan_node};
use crate::render::{DisplayConfig, RenderSink};
use rplidar_data::RawSample;
use std::collections::VecDeque;

/// Outcome of one render tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The batch was fetched; this many points went to the sink.
    Points(usize),
    /// Transport error while fetching. Nothing drawn, nothing logged; the
    /// next tick simply retries. Misses are tolerated indefinitely.
    Miss,
}

/// Owns the reusable node buffer and the byte carry-over between ticks.
/// Bytes that do not yet form a complete node stay pending until the next
/// tick instead of being assumed to fill the buffer.
pub struct ScanAcquisition {
    pending: VecDeque<u8>,
    nodes: Vec<RawSample>,
}

impl Default for ScanAcquisition {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanAcquisition {
    pub fn new() -> Self {
        ScanAcquisition {
            pending: VecDeque::new(),
            nodes: Vec::with_capacity(MAX_SCAN_NODES),
        }
    }

    /// Run one acquisition tick. Called once per render tick while the
    /// connection is in the scanning state.
    pub fn tick(
        &mut self,
        device: &mut RplidarDevice,
        sink: &mut dyn RenderSink,
        config: &DisplayConfig,
    ) -> TickOutcome {
        let bytes = match device.read_pending() {
            Ok(bytes) => bytes,
            Err(_) => return TickOutcome::Miss,
        };
        self.ingest(&bytes);
        self.frame_nodes();

        for sample in &self.nodes {
            let point = project(&decode(sample, config.scale), config.center);
            sink.draw_point(&point);
        }
        TickOutcome::Points(self.nodes.len())
    }

    fn ingest(&mut self, bytes: &[u8]) {
        self.pending.extend(bytes);
    }

    /// Extract at most [`MAX_SCAN_NODES`] complete nodes from the pending
    /// bytes into the node buffer, sorted by raw angle so the output sweep
    /// is angularly consistent regardless of acquisition order. Bytes that
    /// do not line up on a node boundary are skipped one at a time until
    /// the stream resynchronizes.
    fn frame_nodes(&mut self) {
        self.nodes.clear();
        while self.pending.len() >= SCAN_NODE_SIZE && self.nodes.len() < MAX_SCAN_NODES {
            self.pending.make_contiguous();
            let (head, _) = self.pending.as_slices();
            if is_scan_node(&head[..SCAN_NODE_SIZE]) {
                self.nodes.push(parse_scan_node(&head[..SCAN_NODE_SIZE]));
                self.pending.drain(..SCAN_NODE_SIZE);
            } else {
                self.pending.pop_front();
            }
        }
        self.nodes.sort_unstable_by_key(|sample| sample.angle_z_q14);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::sleep_ms;
    use rplidar_data::{Quality, ScreenPoint};
    use serialport::{SerialPort, TTYPort};
    use std::io::Write;

    struct CollectingSink {
        points: Vec<ScreenPoint>,
    }

    impl RenderSink for CollectingSink {
        fn draw_point(&mut self, point: &ScreenPoint) {
            self.points.push(*point);
        }
    }

    fn node_bytes(quality: u8, angle_degrees: f64, distance_mm: f64) -> [u8; 5] {
        let angle_q6 = (angle_degrees * 64.0) as u16;
        let dist_q2 = ((distance_mm * 4.0) as u16).to_le_bytes();
        [
            (quality << 2) | 0x01,
            (((angle_q6 & 0x7F) as u8) << 1) | 0x01,
            (angle_q6 >> 7) as u8,
            dist_q2[0],
            dist_q2[1],
        ]
    }

    fn config() -> DisplayConfig {
        DisplayConfig {
            scale: 0.1,
            center: (400.0, 250.0),
        }
    }

    #[test]
    fn test_frame_nodes_orders_by_angle() {
        let mut acquisition = ScanAcquisition::new();
        for degrees in [270.0, 30.0, 180.0, 90.0] {
            acquisition.ingest(&node_bytes(10, degrees, 500.0));
        }
        acquisition.frame_nodes();

        let angles: Vec<u16> = acquisition
            .nodes
            .iter()
            .map(|sample| sample.angle_z_q14)
            .collect();
        assert_eq!(angles.len(), 4);
        assert!(angles.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_frame_nodes_resynchronizes_after_garbage() {
        let mut acquisition = ScanAcquisition::new();
        acquisition.ingest(&[0x00, 0xFF, 0x03]); // torn fragment
        acquisition.ingest(&node_bytes(5, 45.0, 1000.0));
        acquisition.frame_nodes();

        assert_eq!(acquisition.nodes.len(), 1);
        assert_eq!(acquisition.nodes[0].dist_mm_q2, 4000);
    }

    #[test]
    fn test_partial_node_carries_over_to_next_tick() {
        let mut acquisition = ScanAcquisition::new();
        let bytes = node_bytes(5, 45.0, 1000.0);
        acquisition.ingest(&bytes[..3]);
        acquisition.frame_nodes();
        assert!(acquisition.nodes.is_empty());

        acquisition.ingest(&bytes[3..]);
        acquisition.frame_nodes();
        assert_eq!(acquisition.nodes.len(), 1);
    }

    #[test]
    fn test_tick_streams_points_from_device() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let mut device = RplidarDevice::from_port(Box::new(slave) as Box<dyn SerialPort>);

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&node_bytes(0, 90.0, 1000.0));
        bytes.extend_from_slice(&node_bytes(20, 45.0, 2000.0));
        master.write(&bytes).unwrap();
        sleep_ms(10);

        let mut acquisition = ScanAcquisition::new();
        let mut sink = CollectingSink { points: Vec::new() };
        let outcome = acquisition.tick(&mut device, &mut sink, &config());

        assert_eq!(outcome, TickOutcome::Points(2));
        assert_eq!(sink.points.len(), 2);
        // 45 degrees sorts ahead of 90 degrees; the low-quality return kept
        // its classification through projection.
        assert_eq!(sink.points[0].quality, Quality::Normal);
        assert_eq!(sink.points[1].quality, Quality::Low);
    }

    #[test]
    fn test_tick_with_no_data_draws_nothing() {
        let (_master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let mut device = RplidarDevice::from_port(Box::new(slave) as Box<dyn SerialPort>);

        let mut acquisition = ScanAcquisition::new();
        let mut sink = CollectingSink { points: Vec::new() };
        let outcome = acquisition.tick(&mut device, &mut sink, &config());

        assert_eq!(outcome, TickOutcome::Points(0));
        assert!(sink.points.is_empty());
    }
}
