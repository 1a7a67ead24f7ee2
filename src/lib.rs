#![cfg_attr(not(test), no_std)]

use embedded_hal::i2c::{Error as _, I2c};
use log::debug;

mod constants;
pub use constants::*;

mod error;
pub use error::*;

mod config;
pub use config::*;

mod frame;
pub use frame::*;

mod calibration;
pub use calibration::*;

/// Represents the lifecycle state of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// The sensor has not been confirmed present. Reads fail with `Error::NotInitialized`.
    Uninitialized,
    /// `begin()` succeeded and reads are allowed.
    Ready,
}

/// Represents an FS3000 air velocity sensor.
///
/// This struct provides methods to interact with the sensor,
/// such as checking its presence, reading data, and selecting its range.
///
/// # Type Parameters
///
/// * `I2C`: The type of the bus used to communicate with the sensor.
///   It must implement `embedded_hal::i2c::I2c`.
pub struct Fs3000<I2C> {
    i2c: I2C,
    config: Config,
    state: DriverState,
    last_checksum_ok: Option<bool>,
}

/// A value read from the sensor, together with the validity of the frame it came from.
///
/// A bad checksum does not stop the conversion; callers that care should
/// discard readings where `checksum_ok` is false.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading<T> {
    pub value: T,
    pub checksum_ok: bool,
}

impl<T> Reading<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> Reading<U> {
        Reading {
            value: f(self.value),
            checksum_ok: self.checksum_ok,
        }
    }
}

/// Represents a single data sample read from the FS3000 sensor.
///
/// All fields are derived from the same frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fs3000Data {
    /// 12-bit raw flow reading, 409 to 3686 in normal operation.
    pub raw: u16,
    /// Air velocity in m/s.
    pub meters_per_second: f32,
    /// Air velocity in mph.
    pub miles_per_hour: f32,
    /// Whether the frame checksum matched.
    pub checksum_ok: bool,
}

impl<I> Fs3000<I>
where
    I: I2c,
{
    /// Creates a new `Fs3000` sensor instance.
    ///
    /// The driver starts `Uninitialized`; call `begin()` before reading.
    ///
    /// # Arguments
    ///
    /// * `i2c`: The bus the sensor is attached to.
    /// * `config`: The initial configuration for the sensor.
    pub fn new(i2c: I, config: Config) -> Self {
        Self {
            i2c,
            config,
            state: DriverState::Uninitialized,
            last_checksum_ok: None,
        }
    }

    /// Checks that the sensor acknowledges its address and moves the driver to `Ready`.
    ///
    /// The FS3000 has no settings to adjust, so this is only a presence check.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the sensor acknowledged.
    /// * `Err(Error::NoAck)` otherwise. The driver stays `Uninitialized`.
    pub fn begin(&mut self) -> Result<(), Error> {
        if !self.is_connected() {
            log::error!("FS3000 did not acknowledge at {:#04X}", DEVICE_ADDRESS);
            return Err(Error::NoAck);
        }
        self.state = DriverState::Ready;
        debug!("FS3000 begin complete, range {:?}", self.config.range);
        Ok(())
    }

    /// Probes the sensor with a zero-length write. Does not change the driver state.
    pub fn is_connected(&mut self) -> bool {
        match self.i2c.write(DEVICE_ADDRESS, &[]) {
            Ok(()) => true,
            Err(e) => {
                debug!("Presence probe failed: {:?}", e.kind());
                false
            }
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Selects the calibration curve matching the connected part.
    ///
    /// There are two varieties of this sensor, FS3000-1005 (0-7.23 m/s) and
    /// FS3000-1015 (0-15 m/s). Setting the same range twice has no further effect.
    pub fn set_range(&mut self, range: AirflowRange) {
        debug!("Setting airflow range to: {:?}", range);
        self.config.range = range;
    }

    pub fn range(&self) -> AirflowRange {
        self.config.range
    }

    /// Checksum validity of the most recent frame, `None` before the first read.
    pub fn last_checksum_ok(&self) -> Option<bool> {
        self.last_checksum_ok
    }

    /// Reads the 12-bit raw flow value (409-3686).
    ///
    /// # Returns
    ///
    /// * `Ok(Reading<u16>)` with the raw value and the checksum result.
    /// * `Err(Error::NotInitialized)` if `begin()` has not succeeded.
    /// * `Err(Error::NoAck)` if the bus transaction failed.
    /// * `Err(Error::BadChecksum)` on a checksum mismatch under `ChecksumPolicy::Reject`.
    pub fn read_raw(&mut self) -> Result<Reading<u16>, Error> {
        let frame = self.acquire()?;
        Ok(Reading {
            value: frame.raw(),
            checksum_ok: frame.is_valid(),
        })
    }

    /// Reads the air velocity in meters per second (0-7.23 or 0-15 depending on range).
    pub fn read_meters_per_second(&mut self) -> Result<Reading<f32>, Error> {
        let profile = self.config.range.profile();
        let reading = self.read_raw()?.map(|raw| profile.raw_to_velocity(raw));
        debug!("Airflow: {} m/s", reading.value);
        Ok(reading)
    }

    /// Reads the air velocity in miles per hour (0-33ish).
    pub fn read_miles_per_hour(&mut self) -> Result<Reading<f32>, Error> {
        Ok(self.read_meters_per_second()?.map(mps_to_mph))
    }

    /// Reads one frame and returns every derived quantity.
    ///
    /// Errors are the same as for `read_raw`.
    pub fn read_sample(&mut self) -> Result<Fs3000Data, Error> {
        let frame = self.acquire()?;
        let raw = frame.raw();
        let meters_per_second = self.config.range.profile().raw_to_velocity(raw);

        let data = Fs3000Data {
            raw,
            meters_per_second,
            miles_per_hour: mps_to_mph(meters_per_second),
            checksum_ok: frame.is_valid(),
        };
        debug!("Processed frame - {:?}", data);
        Ok(data)
    }

    /// Destroys this driver and releases the bus.
    pub fn release(self) -> I {
        self.i2c
    }

    // Checks the driver state, reads a frame and applies the checksum policy.
    fn acquire(&mut self) -> Result<Frame, Error> {
        if self.state != DriverState::Ready {
            log::error!("Read attempted before begin() succeeded");
            return Err(Error::NotInitialized);
        }

        let frame = self.read_frame()?;
        let report = frame.checksum_report();
        if self.config.debug_checksum {
            report.log(&frame);
        }
        self.last_checksum_ok = Some(report.is_valid());

        if !report.is_valid() {
            log::warn!(
                "Bad checksum: Calculated {:02X}, Received {:02X}. Frame: {:02X?}",
                report.calculated,
                report.received,
                frame.0
            );
            if self.config.checksum_policy == ChecksumPolicy::Reject {
                return Err(Error::BadChecksum);
            }
        }
        Ok(frame)
    }

    // Reads one 5-byte frame. The bus fills the whole buffer or fails, so short reads surface as errors.
    fn read_frame(&mut self) -> Result<Frame, Error> {
        let mut buffer = [0u8; FRAME_LEN];
        self.i2c.read(DEVICE_ADDRESS, &mut buffer).map_err(|e| {
            log::error!("Frame read failed: {:?}", e.kind());
            Error::NoAck
        })?;
        debug!("Read frame: {:02X?}", buffer);
        Ok(Frame(buffer))
    }
}
