// DEVICE_ADDRESS is the fixed I2C address of the FS3000. The part has no address-select pin.
pub const DEVICE_ADDRESS: u8 = 0x28;

// FRAME_LEN is the number of bytes returned by one read transaction:
// [0] checksum, [1] data high, [2] data low, [3..5] generic checksum data.
pub const FRAME_LEN: usize = 5;

// RAW_MASK_HIGH keeps the four valid bits of the data high byte.
pub const RAW_MASK_HIGH: u8 = 0x0F;

// RAW_MIN is the raw reading at zero airflow; at or below it the velocity saturates to 0.
pub const RAW_MIN: u16 = 409;

// RAW_MAX is the raw reading at full scale; at or above it the velocity saturates to the ceiling.
pub const RAW_MAX: u16 = 3686;

// MPS_TO_MPH converts meters per second to miles per hour.
pub const MPS_TO_MPH: f32 = 2.236_936_3;

// Datasheet range codes for the two sensor variants.
pub const AIRFLOW_RANGE_7_MPS: u8 = 0x00;
pub const AIRFLOW_RANGE_15_MPS: u8 = 0x01;
