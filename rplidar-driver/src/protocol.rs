use crate::constants::{DESCRIPTOR_SIZE, LIDAR_CMD_SYNC_BYTE, SCAN_NODE_SIZE};
use crate::error::RplidarError;
use rplidar_data::{DeviceHealth, DeviceInfo, RawSample};

pub(crate) fn hex_string(data: &[u8]) -> String {
    data.iter()
        .map(|e| format!("{:02X}", e))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validate a seven byte response descriptor: sync bytes, announced payload
/// length (30 bits, little endian; the top two bits carry the send mode and
/// are masked off) and the response type code.
pub(crate) fn validate_descriptor(
    descriptor: &[u8],
    maybe_response_length: Option<u32>,
    type_code: u8,
) -> Result<(), RplidarError> {
    if descriptor.len() != DESCRIPTOR_SIZE {
        return Err(RplidarError::InvalidDescriptorLength(descriptor.len()));
    }
    if descriptor[0..2] != [LIDAR_CMD_SYNC_BYTE, 0x5A] {
        return Err(RplidarError::InvalidSyncBytes(hex_string(&descriptor[0..2])));
    }
    if let Some(expected) = maybe_response_length {
        let announced = u32::from_le_bytes([
            descriptor[2],
            descriptor[3],
            descriptor[4],
            descriptor[5],
        ]) & 0x3FFF_FFFF;
        if announced != expected {
            return Err(RplidarError::InvalidResponseLength {
                expected,
                actual: announced,
            });
        }
    }
    if descriptor[6] != type_code {
        return Err(RplidarError::InvalidTypeCode {
            expected: type_code,
            actual: descriptor[6],
        });
    }
    Ok(())
}

/// Decode the 20 byte GET_INFO payload. The firmware version travels low
/// byte first, so the minor revision precedes the major one on the wire.
pub(crate) fn parse_device_info(payload: &[u8]) -> DeviceInfo {
    DeviceInfo {
        model_number: payload[0],
        firmware_minor_version: payload[1],
        firmware_major_version: payload[2],
        hardware_version: payload[3],
        serial_number: payload[4..20].try_into().unwrap(),
    }
}

/// Decode the 3 byte GET_HEALTH payload: a status byte followed by a little
/// endian error code. Unknown status values are treated as faults.
pub(crate) fn parse_health(payload: &[u8]) -> DeviceHealth {
    let code = u16::from_le_bytes([payload[1], payload[2]]);
    match payload[0] {
        0 => DeviceHealth::Good,
        1 => DeviceHealth::Warning { code },
        _ => DeviceHealth::Fault { code },
    }
}

pub(crate) fn is_scan_node(bytes: &[u8]) -> bool {
    debug_assert!(bytes.len() >= SCAN_NODE_SIZE);
    let sync = bytes[0] & 0x01;
    let inverted_sync = (bytes[0] >> 1) & 0x01;
    // The start-of-sweep bit travels alongside its complement; a pair that
    // agrees means we are not looking at a node boundary.
    sync != inverted_sync && bytes[1] & 0x01 == 1
}

/// Decode one five byte measurement node into wire-unit sample fields. The
/// q6 angle is renormalized to the q14-over-90-degrees form so that a full
/// revolution spans the u16 range.
pub(crate) fn parse_scan_node(bytes: &[u8]) -> RawSample {
    debug_assert!(is_scan_node(bytes));
    let quality = bytes[0] >> 2;
    let angle_q6 = ((bytes[1] as u16) >> 1) | ((bytes[2] as u16) << 7);
    let angle_z_q14 = (((angle_q6 as u32) << 8) / 90) as u16;
    let dist_mm_q2 = u16::from_le_bytes([bytes[3], bytes[4]]) as u32;
    RawSample {
        angle_z_q14,
        dist_mm_q2,
        quality,
    }
}
