//! Connection manager: owns the device handle, negotiates the baud rate,
//! runs the health gate and drives the state machine through an idempotent
//! teardown.

use crate::constants::CANDIDATE_BAUD_RATES;
use crate::device::RplidarDevice;
use crate::error::RplidarError;
use crate::time::sleep_ms;
use rplidar_data::{ConnectionState, DeviceHealth, DeviceInfo};
use tracing::{debug, info, warn};

pub struct ConnectionManager {
    state: ConnectionState,
    device: Option<RplidarDevice>,
    identity: Option<DeviceInfo>,
    port_name: String,
    baud_rate: u32,
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionManager {
    pub fn new() -> Self {
        ConnectionManager {
            state: ConnectionState::Disconnected,
            device: None,
            identity: None,
            port_name: String::new(),
            baud_rate: 0,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Identity cached at connect time, for diagnostic reporting.
    pub fn identity(&self) -> Option<&DeviceInfo> {
        self.identity.as_ref()
    }

    /// Baud rate the negotiation settled on.
    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    /// Port the device was connected through.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn device_mut(&mut self) -> Option<&mut RplidarDevice> {
        self.device.as_mut()
    }

    /// Connect to the device, negotiating the baud rate when none is given.
    ///
    /// With an explicit rate exactly one attempt is made. Otherwise the
    /// candidate rates are tried in order until one both opens the port and
    /// yields a device identity; a failed candidate's handle is dropped
    /// before the next attempt so no serial resource leaks. Both failure
    /// modes are terminal for the session.
    pub fn connect(
        &mut self,
        port_name: &str,
        explicit_baud: Option<u32>,
    ) -> Result<&DeviceInfo, RplidarError> {
        self.state = ConnectionState::Connecting;

        let candidates: Vec<u32> = match explicit_baud {
            Some(baud) => vec![baud],
            None => CANDIDATE_BAUD_RATES.to_vec(),
        };

        let outcome = negotiate(port_name, &candidates, |baud| {
            let mut device = RplidarDevice::open(port_name, baud)?;
            if !cfg!(test) {
                // In testing, skip flushing so pre-written responses survive
                device.stop_and_flush()?;
            }
            let info = device.get_device_info()?;
            Ok((device, info))
        });

        match outcome {
            Ok(((device, info), baud)) => {
                info!(port = port_name, baud, "connected to device");
                self.device = Some(device);
                self.port_name = port_name.to_string();
                self.baud_rate = baud;
                self.state = ConnectionState::Connected;
                Ok(self.identity.insert(info))
            }
            Err(e) => {
                self.state = ConnectionState::Failed;
                Err(e)
            }
        }
    }

    /// Health gate. A fault is terminal: the state goes to `Failed`, the
    /// motor is never started and no remediation (reset) is attempted.
    pub fn check_health(&mut self) -> Result<DeviceHealth, RplidarError> {
        self.state = ConnectionState::HealthChecking;
        let device = match self.device.as_mut() {
            Some(device) => device,
            None => {
                self.state = ConnectionState::Failed;
                return Err(RplidarError::NotConnected);
            }
        };

        let health = device.get_health()?;
        match health {
            DeviceHealth::Fault { code } => {
                self.state = ConnectionState::Failed;
                Err(RplidarError::DeviceUnhealthy { code })
            }
            DeviceHealth::Warning { code } => {
                warn!(code, "device reports a health warning");
                self.state = ConnectionState::Ready;
                Ok(health)
            }
            DeviceHealth::Good => {
                self.state = ConnectionState::Ready;
                Ok(health)
            }
        }
    }

    /// Spin the motor and start the measurement stream. Only legal once the
    /// health gate has put the connection into `Ready`.
    pub fn start_scanning(&mut self) -> Result<(), RplidarError> {
        // Never spin the motor unless the health gate said Ready.
        if self.state != ConnectionState::Ready {
            return Err(RplidarError::NotConnected);
        }
        let device = match self.device.as_mut() {
            Some(device) => device,
            None => return Err(RplidarError::NotConnected),
        };
        device.start_motor()?;
        sleep_ms(10);
        device.start_scan()?;
        self.state = ConnectionState::Scanning;
        Ok(())
    }

    /// Ordered teardown: stop the scan, stop the motor, release the serial
    /// handle. Safe to call from any state and any number of times; after
    /// the first call the state is `Disposed` and further calls return
    /// immediately.
    pub fn shutdown(&mut self) {
        if self.state == ConnectionState::Disposed {
            return;
        }
        self.state = ConnectionState::ShuttingDown;
        if let Some(mut device) = self.device.take() {
            if let Err(e) = device.stop_scan() {
                debug!("stop scan during teardown: {e}");
            }
            if let Err(e) = device.stop_motor() {
                debug!("stop motor during teardown: {e}");
            }
            // handle released when `device` drops here
        }
        self.state = ConnectionState::Disposed;
        info!("device disposed");
    }
}

/// Try each candidate rate in order. `attempt` must return
/// [`RplidarError::PortUnavailable`] when the port itself cannot be opened;
/// any other error counts as "opened but unreadable". The distinction picks
/// the terminal error when every candidate fails.
fn negotiate<T>(
    port_name: &str,
    candidates: &[u32],
    mut attempt: impl FnMut(u32) -> Result<T, RplidarError>,
) -> Result<(T, u32), RplidarError> {
    let mut opened_any = false;
    let mut last_open_error = None;
    for &baud in candidates {
        match attempt(baud) {
            Ok(value) => return Ok((value, baud)),
            Err(RplidarError::PortUnavailable { port, source }) => {
                debug!(baud, "port did not open at candidate rate");
                last_open_error = Some(RplidarError::PortUnavailable { port, source });
            }
            Err(e) => {
                debug!(baud, "no identity at candidate rate: {e}");
                opened_any = true;
            }
        }
    }
    if opened_any {
        Err(RplidarError::IdentityUnreadable {
            port: port_name.to_string(),
        })
    } else {
        Err(last_open_error.unwrap_or(RplidarError::IdentityUnreadable {
            port: port_name.to_string(),
        }))
    }
}
