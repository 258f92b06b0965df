use crate::constants::{
    DESCRIPTOR_SIZE, LIDAR_ANS_LENGTH_DEVHEALTH, LIDAR_ANS_LENGTH_DEVINFO,
    LIDAR_ANS_TYPE_DEVHEALTH, LIDAR_ANS_TYPE_DEVINFO, LIDAR_ANS_TYPE_MEASUREMENT,
    LIDAR_CMD_GET_DEVICE_HEALTH, LIDAR_CMD_GET_DEVICE_INFO, LIDAR_CMD_SCAN, LIDAR_CMD_STOP,
};
use crate::error::RplidarError;
use crate::protocol::{parse_device_info, parse_health, validate_descriptor};
use crate::serial::{flush, read, read_available, send_command};
use crate::time::sleep_ms;
use rplidar_data::{DeviceHealth, DeviceInfo};
use serialport::SerialPort;

/// The one open handle to the physical device. Dropping it releases the
/// OS-level serial resource.
pub struct RplidarDevice {
    port: Box<dyn SerialPort>,
}

impl RplidarDevice {
    /// Open the serial port at the given baud rate. Failure to open maps to
    /// [`RplidarError::PortUnavailable`] so the caller can tell "no port"
    /// apart from "port answered garbage" during baud negotiation.
    pub fn open(port_name: &str, baud_rate: u32) -> Result<Self, RplidarError> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(std::time::Duration::from_millis(10))
            .open()
            .map_err(|source| RplidarError::PortUnavailable {
                port: port_name.to_string(),
                source,
            })?;
        Ok(RplidarDevice { port })
    }

    /// Wrap an already open port. Used by tests with pseudo-terminal pairs.
    pub(crate) fn from_port(port: Box<dyn SerialPort>) -> Self {
        RplidarDevice { port }
    }

    /// Stop any scan a previous session left running and drain stale bytes,
    /// so the next command's response starts at a descriptor boundary.
    pub fn stop_and_flush(&mut self) -> Result<(), RplidarError> {
        send_command(&mut self.port, LIDAR_CMD_STOP)?;
        sleep_ms(10);
        flush(&mut self.port)?;
        Ok(())
    }

    pub fn get_device_info(&mut self) -> Result<DeviceInfo, RplidarError> {
        send_command(&mut self.port, LIDAR_CMD_GET_DEVICE_INFO)?;
        let descriptor = read(&mut self.port, DESCRIPTOR_SIZE)?;
        validate_descriptor(
            &descriptor,
            Some(LIDAR_ANS_LENGTH_DEVINFO),
            LIDAR_ANS_TYPE_DEVINFO,
        )?;
        let payload = read(&mut self.port, LIDAR_ANS_LENGTH_DEVINFO as usize)?;
        Ok(parse_device_info(&payload))
    }

    pub fn get_health(&mut self) -> Result<DeviceHealth, RplidarError> {
        send_command(&mut self.port, LIDAR_CMD_GET_DEVICE_HEALTH)?;
        let descriptor = read(&mut self.port, DESCRIPTOR_SIZE)?;
        validate_descriptor(
            &descriptor,
            Some(LIDAR_ANS_LENGTH_DEVHEALTH),
            LIDAR_ANS_TYPE_DEVHEALTH,
        )?;
        let payload = read(&mut self.port, LIDAR_ANS_LENGTH_DEVHEALTH as usize)?;
        Ok(parse_health(&payload))
    }

    /// Ask the device to start streaming measurement nodes. The response
    /// descriptor announces the five byte node format in continuous mode.
    pub fn start_scan(&mut self) -> Result<(), RplidarError> {
        send_command(&mut self.port, LIDAR_CMD_SCAN)?;
        let descriptor = read(&mut self.port, DESCRIPTOR_SIZE)?;
        validate_descriptor(&descriptor, None, LIDAR_ANS_TYPE_MEASUREMENT)?;
        Ok(())
    }

    pub fn stop_scan(&mut self) -> Result<(), RplidarError> {
        send_command(&mut self.port, LIDAR_CMD_STOP)?;
        Ok(())
    }

    /// A-series adapters spin the motor while DTR is held low.
    pub fn start_motor(&mut self) -> Result<(), RplidarError> {
        self.port.write_data_terminal_ready(false)?;
        Ok(())
    }

    pub fn stop_motor(&mut self) -> Result<(), RplidarError> {
        self.port.write_data_terminal_ready(true)?;
        Ok(())
    }

    /// Drain whatever measurement bytes are currently buffered, without
    /// blocking for more.
    pub fn read_pending(&mut self) -> Result<Vec<u8>, RplidarError> {
        read_available(&mut self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serialport::TTYPort;
    use std::io::{Read, Write};

    fn open_pair() -> (TTYPort, RplidarDevice) {
        let (master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let device = RplidarDevice::from_port(Box::new(slave) as Box<dyn SerialPort>);
        (master, device)
    }

    #[test]
    fn test_get_device_info() {
        let (mut master, mut device) = open_pair();
        master
            .write(&[
                0xA5, 0x5A, 0x14, 0x00, 0x00, 0x00, 0x04, // descriptor
                0x18, 0x1D, 0x01, 0x07, // model, fw minor, fw major, hw
                0x02, 0x00, 0x02, 0x02, 0x01, 0x01, 0x00, 0x03, 0x00, 0x01, 0x01, 0x01, 0x01,
                0x01, 0x01, 0x01, // serial number
            ])
            .unwrap();
        sleep_ms(10);

        let info = device.get_device_info().unwrap();
        assert_eq!(info.model_number, 0x18);
        assert_eq!(info.firmware_major_version, 1);
        assert_eq!(info.firmware_minor_version, 0x1D);
        assert_eq!(info.hardware_version, 7);
        assert_eq!(
            info.serial_number,
            [2, 0, 2, 2, 1, 1, 0, 3, 0, 1, 1, 1, 1, 1, 1, 1]
        );

        sleep_ms(10);
        let mut buf = [0u8; 2];
        master.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [0xA5, 0x50]);
    }

    #[test]
    fn test_get_health() {
        let (mut master, mut device) = open_pair();

        master
            .write(&[0xA5, 0x5A, 0x03, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00])
            .unwrap();
        sleep_ms(10);
        assert_eq!(device.get_health().unwrap(), DeviceHealth::Good);

        master
            .write(&[0xA5, 0x5A, 0x03, 0x00, 0x00, 0x00, 0x06, 0x02, 0x33, 0x00])
            .unwrap();
        sleep_ms(10);
        assert_eq!(
            device.get_health().unwrap(),
            DeviceHealth::Fault { code: 0x0033 }
        );
    }

    #[test]
    fn test_start_scan_validates_descriptor() {
        let (mut master, mut device) = open_pair();
        master
            .write(&[0xA5, 0x5A, 0x05, 0x00, 0x00, 0x40, 0x81])
            .unwrap();
        sleep_ms(10);
        device.start_scan().unwrap();

        sleep_ms(10);
        let mut buf = [0u8; 2];
        master.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [0xA5, 0x20]);
    }

    #[test]
    fn test_start_scan_rejects_wrong_type() {
        let (mut master, mut device) = open_pair();
        master
            .write(&[0xA5, 0x5A, 0x05, 0x00, 0x00, 0x40, 0x04])
            .unwrap();
        sleep_ms(10);
        assert!(matches!(
            device.start_scan(),
            Err(RplidarError::InvalidTypeCode {
                expected: 0x81,
                actual: 0x04
            })
        ));
    }

    #[test]
    fn test_stop_scan_sends_stop() {
        let (mut master, mut device) = open_pair();
        device.stop_scan().unwrap();
        sleep_ms(10);

        let mut buf = [0u8; 2];
        master.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [0xA5, 0x25]);
    }
}
