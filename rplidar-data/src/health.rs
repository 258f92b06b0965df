#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Health status reported by the device.
///
/// A `Fault` means the device detected an internal error and must not be
/// asked to spin its motor or range. A `Warning` still passes the health
/// gate; the device keeps working but the operator should be told.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeviceHealth {
    Good,
    Warning { code: u16 },
    Fault { code: u16 },
}

impl DeviceHealth {
    pub fn is_fault(&self) -> bool {
        matches!(self, DeviceHealth::Fault { .. })
    }
}
