use crate::i2c::BusError;
use thiserror::Error;

/// Errors that can occur when driving an MCP23017.
///
/// Every fallible operation returns one of these instead of a bare status.
/// Use [`Error::kind`] to collapse a variant into the coarse
/// [`ErrorKind`] status taxonomy (and [`ErrorKind::code`] for the integer form).
#[derive(Error, Debug)]
pub enum Error {
    /// Logical pin number is outside 0-15.
    #[error("Pin {pin} out of range: MCP23017 pins are numbered 0-15 (GPA0-GPA7, GPB0-GPB7)")]
    PinOutOfRange {
        /// The invalid pin number that was specified.
        pin: u8,
    },
    /// The transport failed while writing a register.
    #[error("Failed to write register 0x{register:02X}: {source}")]
    RegisterWrite {
        /// The register address being written.
        register: u8,
        /// Underlying transport failure.
        source: BusError,
    },
    /// The transport failed while reading a register.
    #[error("Failed to read register 0x{register:02X}: {source}")]
    RegisterRead {
        /// The register address being read.
        register: u8,
        /// Underlying transport failure.
        source: BusError,
    },
    /// The transport delivered fewer bytes than requested.
    #[error(
        "Short read from register 0x{register:02X}: expected {expected} byte(s), got {actual}. The bus transaction was incomplete."
    )]
    ShortRead {
        /// The register address being read.
        register: u8,
        /// Number of bytes requested.
        expected: usize,
        /// Number of bytes actually received.
        actual: usize,
    },
    /// Address is outside the 0x20-0x27 window selectable via A2/A1/A0.
    #[error("Invalid MCP23017 address 0x{address:02X}: must be 0x20-0x27 (set via A2/A1/A0)")]
    InvalidAddress {
        /// The rejected address.
        address: u8,
    },
    /// Nothing acknowledged at the configured address during bring-up.
    #[error(
        "No MCP23017 responding at address 0x{address:02X}: {source}. Check power, wiring and the A2/A1/A0 straps."
    )]
    DeviceNotResponding {
        /// The address that was probed.
        address: u8,
        /// Underlying transport failure.
        source: BusError,
    },
}

/// Coarse error categories, matching the driver's status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Pin number outside 0-15. Always a caller programming error.
    PinRange,
    /// A register write failed or a read came back short.
    RegisterIo,
    /// Bad address or no device at bring-up.
    Address,
}

impl ErrorKind {
    /// Integer status code. `0` is reserved for success.
    pub fn code(self) -> i8 {
        match self {
            ErrorKind::PinRange => -1,
            ErrorKind::RegisterIo => -2,
            ErrorKind::Address => -3,
        }
    }
}

impl Error {
    /// Returns the status category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::PinOutOfRange { .. } => ErrorKind::PinRange,
            Error::RegisterWrite { .. } | Error::RegisterRead { .. } | Error::ShortRead { .. } => {
                ErrorKind::RegisterIo
            }
            Error::InvalidAddress { .. } | Error::DeviceNotResponding { .. } => ErrorKind::Address,
        }
    }
}

/// Status code for a result: `0` on success, otherwise [`ErrorKind::code`].
pub fn status_code<T>(result: &Result<T>) -> i8 {
    match result {
        Ok(_) => 0,
        Err(e) => e.kind().code(),
    }
}

/// Result type alias for MCP23017 operations.
///
/// This is a convenience alias for `std::result::Result<T, Error>` used
/// throughout the crate to reduce boilerplate.
pub type Result<T> = std::result::Result<T, Error>;
