use crate::calibration::{CalibrationProfile, FIFTEEN_MPS_PROFILE, SEVEN_MPS_PROFILE};
use crate::constants::{AIRFLOW_RANGE_15_MPS, AIRFLOW_RANGE_7_MPS};
use crate::error::Error;

/// Represents the measurement range of the FS3000, which is fixed by the part number.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum AirflowRange {
    /// FS3000-1005, 0 to 7.23 m/s.
    SevenMps,
    /// FS3000-1015, 0 to 15 m/s.
    FifteenMps,
}

impl AirflowRange {
    /// Returns the calibration curve from the datasheet for this variant.
    pub fn profile(self) -> &'static CalibrationProfile {
        match self {
            AirflowRange::SevenMps => &SEVEN_MPS_PROFILE,
            AirflowRange::FifteenMps => &FIFTEEN_MPS_PROFILE,
        }
    }

    /// Maps a datasheet range code (`0x00` or `0x01`) to a variant.
    pub fn from_u8(code: u8) -> Result<Self, Error> {
        match code {
            AIRFLOW_RANGE_7_MPS => Ok(AirflowRange::SevenMps),
            AIRFLOW_RANGE_15_MPS => Ok(AirflowRange::FifteenMps),
            _ => {
                log::error!("Unknown airflow range code {:#04X}", code);
                Err(Error::InvalidArg)
            }
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            AirflowRange::SevenMps => AIRFLOW_RANGE_7_MPS,
            AirflowRange::FifteenMps => AIRFLOW_RANGE_15_MPS,
        }
    }
}

/// What a read does when the frame checksum does not match.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum ChecksumPolicy {
    /// Convert the frame anyway and flag it through `Reading::checksum_ok`.
    Report,
    /// Fail the read with `Error::BadChecksum`.
    Reject,
}

/// Configuration settings for the FS3000 sensor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
    /// The sensor variant, selecting the calibration curve.
    pub range: AirflowRange,
    /// Handling of frames with a bad checksum.
    pub checksum_policy: ChecksumPolicy,
    /// Log every frame and the checksum arithmetic at debug level.
    pub debug_checksum: bool,
}

impl Config {
    /// Creates a new `Config` instance.
    ///
    /// # Arguments
    ///
    /// * `range` - The `AirflowRange` of the connected part.
    /// * `checksum_policy` - The `ChecksumPolicy` applied to every read.
    pub fn new(range: AirflowRange, checksum_policy: ChecksumPolicy) -> Config {
        Config {
            range,
            checksum_policy,
            debug_checksum: false,
        }
    }

    /// Sets the airflow range for the configuration.
    pub fn range(mut self, range: AirflowRange) -> Self {
        self.range = range;
        self
    }

    /// Sets the checksum policy for the configuration.
    pub fn checksum_policy(mut self, checksum_policy: ChecksumPolicy) -> Self {
        self.checksum_policy = checksum_policy;
        self
    }

    pub fn debug_checksum(mut self, enabled: bool) -> Self {
        self.debug_checksum = enabled;
        self
    }
}

/// Provides default configuration values for the FS3000 sensor.
impl Default for Config {
    /// The default configuration targets the FS3000-1005 (7.23 m/s) and only reports bad checksums.
    fn default() -> Config {
        Config::new(AirflowRange::SevenMps, ChecksumPolicy::Report)
    }
}
