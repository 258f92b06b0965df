#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Device identity, read once at connect time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceInfo {
    pub model_number: u8,
    pub firmware_major_version: u8,
    pub firmware_minor_version: u8,
    pub hardware_version: u8,
    pub serial_number: [u8; 16],
}

impl DeviceInfo {
    /// Serial number rendered as a contiguous hex string.
    pub fn serial_number_hex(&self) -> String {
        self.serial_number
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_number_hex() {
        let info = DeviceInfo {
            model_number: 24,
            firmware_major_version: 1,
            firmware_minor_version: 29,
            hardware_version: 7,
            serial_number: [
                0xAB, 0xCD, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A,
                0x0B, 0x0C, 0xFF,
            ],
        };
        assert_eq!(
            info.serial_number_hex(),
            "ABCD000102030405060708090A0B0CFF"
        );
    }
}
