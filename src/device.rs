//! Device bring-up, register access and the per-pin runtime table.

use crate::consts::{self, reg};
use crate::error::{Error, Result};
use crate::gpio::{IntoPin, PinMode};
use crate::i2c::{BusError, DeviceAddress, Transport};
use crate::interrupt::{InterruptCallback, InterruptMode, InterruptOutputConfig};
use log::{debug, trace, warn};
use std::fmt;

/// Runtime state recorded for one pin.
#[derive(Default)]
pub(crate) struct PinRecord<'cb> {
    pub(crate) mode: Option<PinMode>,
    pub(crate) trigger: Option<InterruptMode>,
    pub(crate) callback: Option<InterruptCallback<'cb>>,
}

impl fmt::Debug for PinRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinRecord")
            .field("mode", &self.mode)
            .field("trigger", &self.trigger)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Snapshot of what the driver has recorded for a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinState {
    /// Last mode set via `pin_mode`, if any.
    pub mode: Option<PinMode>,
    /// Armed interrupt trigger, if any.
    pub interrupt: Option<InterruptMode>,
    pub has_callback: bool,
}

/// A handle to one MCP23017 on a two-wire bus.
///
/// Owns the transport and a table of 16 pin records (mode, trigger, callback).
/// Callbacks may borrow from the caller for `'cb`.
///
/// **Note:** Nothing is cached between calls: every configuration change
/// re-reads the affected register before writing it back.
pub struct Mcp23017<'cb, T> {
    pub(crate) transport: T,
    pub(crate) address: DeviceAddress,
    pub(crate) pins: [PinRecord<'cb>; consts::PIN_COUNT as usize],
    pub(crate) interrupt_output: InterruptOutputConfig,
    pub(crate) interrupt_output_configured: bool,
}

impl<T> fmt::Debug for Mcp23017<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mcp23017")
            .field("address", &self.address)
            .field("pins", &self.pins)
            .field("interrupt_output", &self.interrupt_output)
            .field(
                "interrupt_output_configured",
                &self.interrupt_output_configured,
            )
            .finish_non_exhaustive()
    }
}

impl<'cb, T: Transport> Mcp23017<'cb, T> {
    // --- Constructors and Info ---

    /// Brings up the device at `address` with the default interrupt output
    /// policy (active-high, push-pull, INTA/INTB independent).
    ///
    /// Probes the device once; if nothing acknowledges, returns
    /// [`Error::DeviceNotResponding`] and no handle is created.
    pub fn new(transport: T, address: DeviceAddress) -> Result<Self> {
        Self::with_config(transport, address, InterruptOutputConfig::default())
    }

    /// Like [`Mcp23017::new`] with a custom interrupt output configuration.
    pub fn with_config(
        transport: T,
        address: DeviceAddress,
        interrupt_output: InterruptOutputConfig,
    ) -> Result<Self> {
        let mut device = Self {
            transport,
            address,
            pins: Default::default(),
            interrupt_output,
            interrupt_output_configured: false,
        };
        device.probe()?;
        debug!("MCP23017 ready at {}", address);
        Ok(device)
    }

    fn probe(&mut self) -> Result<()> {
        let address = self.address.value();
        let mut buf = [0u8; 1];
        match self.transport.read(address, reg::IOCONA, &mut buf) {
            Ok(1) => Ok(()),
            Ok(n) => {
                warn!("Probe of {} returned {} bytes", self.address, n);
                Err(Error::DeviceNotResponding {
                    address,
                    source: BusError::Other(format!("short read ({} of 1 bytes)", n)),
                })
            }
            Err(source) => {
                warn!("Probe of {} failed: {}", self.address, source);
                Err(Error::DeviceNotResponding { address, source })
            }
        }
    }

    /// Returns the bus address of the device.
    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    /// Returns the interrupt output configuration applied on first arm.
    pub fn interrupt_output_config(&self) -> InterruptOutputConfig {
        self.interrupt_output
    }

    /// Returns what the driver has recorded for `pin`.
    pub fn pin_state(&self, pin: impl IntoPin) -> Result<PinState> {
        let record = &self.pins[pin.into_pin()?.index() as usize];
        Ok(PinState {
            mode: record.mode,
            interrupt: record.trigger,
            has_callback: record.callback.is_some(),
        })
    }

    /// Consumes the handle and returns the transport.
    pub fn release(self) -> T {
        self.transport
    }

    // --- Register Access ---

    /// Writes `bytes` starting at `register`.
    pub fn write_register(&mut self, register: u8, bytes: &[u8]) -> Result<()> {
        trace!("Write reg 0x{:02X} = {:02X?}", register, bytes);
        self.transport
            .write(self.address.value(), register, bytes)
            .map_err(|source| {
                trace!("write to reg 0x{:02X} failed: {}", register, source);
                Error::RegisterWrite { register, source }
            })
    }

    /// Fills `buffer` starting at `register`. A short read is an error.
    pub fn read_registers(&mut self, register: u8, buffer: &mut [u8]) -> Result<()> {
        let expected = buffer.len();
        let actual = self
            .transport
            .read(self.address.value(), register, buffer)
            .map_err(|source| {
                trace!("read of reg 0x{:02X} failed: {}", register, source);
                Error::RegisterRead { register, source }
            })?;
        if actual < expected {
            warn!(
                "Short read from reg 0x{:02X}: {} of {} bytes",
                register, actual, expected
            );
            return Err(Error::ShortRead {
                register,
                expected,
                actual,
            });
        }
        trace!("Read reg 0x{:02X} = {:02X?}", register, buffer);
        Ok(())
    }

    /// Reads a single register.
    pub fn read_register(&mut self, register: u8) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_registers(register, &mut buf)?;
        Ok(buf[0])
    }
}
