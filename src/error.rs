#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The sensor did not acknowledge the transaction, or the bus failed.
    NoAck,
    /// A read was attempted before `begin()` confirmed the sensor is present.
    NotInitialized,
    /// Checksum mismatch, only raised under `ChecksumPolicy::Reject`.
    BadChecksum,
    InvalidArg,
}
