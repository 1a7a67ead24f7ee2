use crate::constants::{FRAME_LEN, RAW_MASK_HIGH};
use log::debug;

/// One 5-byte response from the sensor: `[checksum, data high, data low, aux, aux]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame(pub [u8; FRAME_LEN]);

/// Intermediate values of the checksum computation over a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumReport {
    /// Sum of bytes 1 to 4, modulo 256.
    pub sum: u8,
    /// Two's complement of `sum`, the checksum the sensor should have sent.
    pub calculated: u8,
    /// Checksum byte as received.
    pub received: u8,
    /// `sum + received`, modulo 256. Zero for a good frame.
    pub overall: u8,
}

impl ChecksumReport {
    pub fn is_valid(&self) -> bool {
        self.overall == 0x00
    }

    /// Dumps the checksum arithmetic for `frame` at debug level.
    pub fn log(&self, frame: &Frame) {
        debug!("Frame bytes: {:02X?}", frame.0);
        debug!("Sum of received data bytes                       = {:#04X}", self.sum);
        debug!("Calculated checksum                              = {:#04X}", self.calculated);
        debug!("Received checksum byte                           = {:#04X}", self.received);
        debug!("Sum of received data bytes and received checksum = {:#04X}", self.overall);
    }
}

impl Frame {
    pub fn checksum(&self) -> u8 {
        self.0[0]
    }

    pub fn data_high(&self) -> u8 {
        self.0[1]
    }

    pub fn data_low(&self) -> u8 {
        self.0[2]
    }

    /// The two generic checksum data bytes.
    pub fn aux(&self) -> [u8; 2] {
        [self.0[3], self.0[4]]
    }

    pub fn checksum_report(&self) -> ChecksumReport {
        let sum = self.0[1..]
            .iter()
            .fold(0u8, |sum, &b| sum.wrapping_add(b));
        let received = self.checksum();
        ChecksumReport {
            sum,
            calculated: (!sum).wrapping_add(1),
            received,
            overall: sum.wrapping_add(received),
        }
    }

    /// True when the checksum byte and the four data bytes sum to zero modulo 256.
    pub fn is_valid(&self) -> bool {
        self.checksum_report().is_valid()
    }

    /// Extracts the 12-bit flow reading. Only the low nibble of the high byte is valid.
    pub fn raw(&self) -> u16 {
        (u16::from(self.data_high() & RAW_MASK_HIGH) << 8) | u16::from(self.data_low())
    }
}

impl From<[u8; FRAME_LEN]> for Frame {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        Frame(bytes)
    }
}
