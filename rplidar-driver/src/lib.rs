//! Serial driver for Slamtec RPLIDAR A-series range finders, built around a
//! cooperative render-tick loop.
//!
//! The [`connection::ConnectionManager`] negotiates the baud rate and owns
//! the serial handle, the health gate decides whether the motor may spin,
//! and [`acquisition::ScanAcquisition`] turns each tick's raw measurement
//! nodes into screen-space points for a [`render::RenderSink`]. Cancellation
//! is a single atomic flag set by the interrupt handler and observed at the
//! start of every tick ([`shutdown::ShutdownCoordinator`]).

mod constants;
mod error;
mod protocol;
mod serial;
mod time;

pub mod acquisition;
pub mod connection;
pub mod decode;
pub mod device;
pub mod render;
pub mod shutdown;

pub use crate::acquisition::{ScanAcquisition, TickOutcome};
pub use crate::connection::ConnectionManager;
pub use crate::constants::{CANDIDATE_BAUD_RATES, DEFAULT_DISPLAY_SCALE, DEFAULT_PORT};
pub use crate::device::RplidarDevice;
pub use crate::error::RplidarError;
pub use crate::render::{DisplayConfig, PointStyle, RenderSink};
pub use crate::shutdown::ShutdownCoordinator;
