use crate::constants::{LIDAR_CMD_SYNC_BYTE, N_READ_TRIALS};
use crate::error::RplidarError;
use crate::time::sleep_ms;
use serialport::SerialPort;
use std::io::Read;

pub(crate) fn send_command(
    port: &mut Box<dyn SerialPort>,
    command: u8,
) -> std::io::Result<usize> {
    let data: [u8; 2] = [LIDAR_CMD_SYNC_BYTE, command];
    port.write(&data)
}

pub(crate) fn get_n_read(port: &mut Box<dyn SerialPort>) -> Result<usize, RplidarError> {
    let n_u32: u32 = port.bytes_to_read()?;
    Ok(n_u32.try_into().unwrap_or(0))
}

/// Discard whatever the device has already pushed into the receive buffer.
pub(crate) fn flush(port: &mut Box<dyn SerialPort>) -> Result<(), RplidarError> {
    let n_read: usize = get_n_read(port).unwrap_or(0);
    if n_read == 0 {
        return Ok(());
    }
    let mut pending: Vec<u8> = vec![0; n_read];
    port.read_exact(pending.as_mut_slice())?;
    Ok(())
}

/// Read exactly `data_size` bytes, polling the receive buffer a bounded
/// number of times before giving up.
pub(crate) fn read(
    port: &mut Box<dyn SerialPort>,
    data_size: usize,
) -> Result<Vec<u8>, RplidarError> {
    assert!(data_size > 0);
    for _ in 0..N_READ_TRIALS {
        let n_read: usize = get_n_read(port)?;

        if n_read < data_size {
            sleep_ms(10);
            continue;
        }

        let mut packet: Vec<u8> = vec![0; data_size];
        port.read_exact(packet.as_mut_slice())?;
        return Ok(packet);
    }
    Err(RplidarError::Timeout)
}

/// Drain everything currently buffered without blocking. Returns an empty
/// vector when the device has produced nothing since the last call.
pub(crate) fn read_available(port: &mut Box<dyn SerialPort>) -> Result<Vec<u8>, RplidarError> {
    let n_read: usize = get_n_read(port)?;
    if n_read == 0 {
        return Ok(Vec::new());
    }
    let mut pending: Vec<u8> = vec![0; n_read];
    port.read_exact(pending.as_mut_slice())?;
    Ok(pending)
}
