pub(crate) const DESCRIPTOR_SIZE: usize = 7;
pub(crate) const SCAN_NODE_SIZE: usize = 5;
pub(crate) const LIDAR_CMD_SYNC_BYTE: u8 = 0xA5;
pub(crate) const LIDAR_CMD_GET_DEVICE_INFO: u8 = 0x50;
pub(crate) const LIDAR_CMD_GET_DEVICE_HEALTH: u8 = 0x52;
pub(crate) const LIDAR_CMD_SCAN: u8 = 0x20;
pub(crate) const LIDAR_CMD_STOP: u8 = 0x25;
pub(crate) const LIDAR_ANS_TYPE_DEVINFO: u8 = 0x04;
pub(crate) const LIDAR_ANS_LENGTH_DEVINFO: u32 = 20;
pub(crate) const LIDAR_ANS_TYPE_DEVHEALTH: u8 = 0x06;
pub(crate) const LIDAR_ANS_LENGTH_DEVHEALTH: u32 = 3;
pub(crate) const LIDAR_ANS_TYPE_MEASUREMENT: u8 = 0x81;
pub(crate) const N_READ_TRIALS: usize = 3;

/// Upper bound on nodes processed in one tick, roughly one revolution.
pub(crate) const MAX_SCAN_NODES: usize = 8192;

/// Baud rates tried in order when none is given on the command line.
pub const CANDIDATE_BAUD_RATES: [u32; 2] = [115_200, 256_000];

/// Compiled-in fallback when no port argument is given.
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Millimeters to screen units.
pub const DEFAULT_DISPLAY_SCALE: f64 = 0.1;
