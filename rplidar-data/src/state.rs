#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle of the single physical device connection.
///
/// Owned by the connection manager. The shutdown coordinator may force a
/// transition to `ShuttingDown`/`Disposed` from any state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    HealthChecking,
    Ready,
    Scanning,
    ShuttingDown,
    Disposed,
    Failed,
}
