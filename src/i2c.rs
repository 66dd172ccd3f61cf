//! Two-wire bus plumbing: device addressing and the register transport.

use crate::consts;
use crate::error::{Error, Result};
use log::trace;
use std::fmt;
use thiserror::Error;

/// A validated 7-bit MCP23017 bus address (0x20-0x27).
/// Use `DeviceAddress::new(addr)` or `DeviceAddress::from_pins(a2, a1, a0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceAddress(u8);

impl DeviceAddress {
    /// Creates an address, checking it lies in the chip's 0x20-0x27 window.
    pub fn new(addr: u8) -> Result<Self> {
        if (consts::ADDRESS_MIN..=consts::ADDRESS_MAX).contains(&addr) {
            Ok(DeviceAddress(addr))
        } else {
            Err(Error::InvalidAddress { address: addr })
        }
    }

    /// Builds the address from the levels strapped on the A2, A1 and A0 pins.
    pub fn from_pins(a2: bool, a1: bool, a0: bool) -> Self {
        DeviceAddress(consts::ADDRESS_MIN | ((a2 as u8) << 2) | ((a1 as u8) << 1) | (a0 as u8))
    }

    /// Returns the raw 7-bit address.
    #[inline]
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for DeviceAddress {
    fn default() -> Self {
        DeviceAddress(consts::DEFAULT_ADDRESS)
    }
}

impl TryFrom<u8> for DeviceAddress {
    type Error = Error;

    fn try_from(addr: u8) -> Result<Self> {
        DeviceAddress::new(addr)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// Transport-level failure reported by a [`Transport`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The addressed device did not acknowledge.
    #[error("device did not acknowledge (NACK)")]
    Nack,
    /// Another master won arbitration.
    #[error("bus arbitration lost")]
    ArbitrationLost,
    /// Misplaced START/STOP or other bus-level fault.
    #[error("bus error (misplaced START/STOP condition)")]
    Bus,
    /// Anything else the transport reports.
    #[error("transport error: {0}")]
    Other(String),
}

impl From<embedded_hal::i2c::ErrorKind> for BusError {
    fn from(kind: embedded_hal::i2c::ErrorKind) -> Self {
        use embedded_hal::i2c::ErrorKind;
        match kind {
            ErrorKind::NoAcknowledge(_) => BusError::Nack,
            ErrorKind::ArbitrationLoss => BusError::ArbitrationLost,
            ErrorKind::Bus => BusError::Bus,
            other => BusError::Other(format!("{:?}", other)),
        }
    }
}

/// Register-oriented access to a device on a two-wire bus.
///
/// Both calls are blocking. Exclusive bus access for the duration of a call
/// is the implementor's responsibility when the bus is shared.
pub trait Transport {
    /// Sends `[register, bytes...]` to the device at `address`.
    fn write(&mut self, address: u8, register: u8, bytes: &[u8])
        -> std::result::Result<(), BusError>;

    /// Sends `[register]` then reads up to `buffer.len()` bytes, the device
    /// auto-incrementing the register address. Returns the number of bytes
    /// actually received.
    fn read(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> std::result::Result<usize, BusError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(
        &mut self,
        address: u8,
        register: u8,
        bytes: &[u8],
    ) -> std::result::Result<(), BusError> {
        (**self).write(address, register, bytes)
    }

    fn read(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> std::result::Result<usize, BusError> {
        (**self).read(address, register, buffer)
    }
}

/// [`Transport`] over any `embedded-hal` 1.0 blocking I2C bus.
#[derive(Debug)]
pub struct I2cTransport<I2C> {
    bus: I2C,
}

impl<I2C> I2cTransport<I2C> {
    pub fn new(bus: I2C) -> Self {
        Self { bus }
    }

    /// Gives the bus back.
    pub fn release(self) -> I2C {
        self.bus
    }
}

impl<I2C> Transport for I2cTransport<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn write(
        &mut self,
        address: u8,
        register: u8,
        bytes: &[u8],
    ) -> std::result::Result<(), BusError> {
        use embedded_hal::i2c::Error as _;

        let mut frame = Vec::with_capacity(bytes.len() + 1);
        frame.push(register);
        frame.extend_from_slice(bytes);
        trace!("I2C write to 0x{:02X}: {:02X?}", address, frame);
        self.bus
            .write(address, &frame)
            .map_err(|e| BusError::from(e.kind()))
    }

    fn read(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> std::result::Result<usize, BusError> {
        use embedded_hal::i2c::Error as _;

        self.bus
            .write_read(address, &[register], buffer)
            .map_err(|e| BusError::from(e.kind()))?;
        trace!(
            "I2C read from 0x{:02X} reg 0x{:02X}: {:02X?}",
            address,
            register,
            buffer
        );
        // embedded-hal transfers either fill the buffer or fail.
        Ok(buffer.len())
    }
}
