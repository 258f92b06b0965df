use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RplidarError {
    #[error("cannot open serial port {port}: {source}")]
    PortUnavailable {
        port: String,
        source: serialport::Error,
    },

    #[error("port {port} opened but the device identity could not be read at any candidate baud rate")]
    IdentityUnreadable { port: String },

    #[error("device reports an internal fault, error code {code:#06x}; reboot the device to retry")]
    DeviceUnhealthy { code: u16 },

    #[error("response descriptor must be seven bytes, got {0}")]
    InvalidDescriptorLength(usize),

    #[error("response descriptor must start with A5 5A, got {0}")]
    InvalidSyncBytes(String),

    #[error("expected a response payload of {expected} bytes, descriptor announces {actual}")]
    InvalidResponseLength { expected: u32, actual: u32 },

    #[error("expected response type {expected:#04x}, got {actual:#04x}")]
    InvalidTypeCode { expected: u8, actual: u8 },

    #[error("operation timed out waiting for device data")]
    Timeout,

    #[error("device is not connected")]
    NotConnected,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
}
