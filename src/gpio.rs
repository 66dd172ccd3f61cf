//! Pin addressing and per-pin configuration (direction, pull-up, polarity, level).

use crate::consts::{self, reg};
use crate::device::Mcp23017;
use crate::error::{Error, Result};
use crate::i2c::Transport;
use log::{debug, trace};
use std::fmt;

/// How a pin is configured by [`Mcp23017::pin_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
    /// Input with the internal 100k pull-up enabled.
    PulledUpInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    Low,
    High,
}

impl PinLevel {
    #[inline]
    pub fn is_high(self) -> bool {
        self == PinLevel::High
    }
}

impl From<bool> for PinLevel {
    fn from(high: bool) -> Self {
        if high {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }
}

/// One of the two 8-pin ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    A,
    B,
}

impl Port {
    /// 0 for port A, 1 for port B.
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Port::A => 0,
            Port::B => 1,
        }
    }
}

/// Selects which ports [`Mcp23017::poll_interrupts`] services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortGroup {
    A,
    B,
    #[default]
    Both,
}

impl PortGroup {
    /// Ports in service order (A before B).
    pub fn ports(self) -> &'static [Port] {
        match self {
            PortGroup::A => &[Port::A],
            PortGroup::B => &[Port::B],
            PortGroup::Both => &[Port::A, Port::B],
        }
    }
}

/// Per-port register families. Each has an A and a B instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterFamily {
    Direction,
    Polarity,
    InterruptEnable,
    DefaultValue,
    InterruptControl,
    Config,
    PullUp,
    InterruptFlag,
    InterruptCapture,
    Gpio,
    OutputLatch,
}

impl RegisterFamily {
    /// Register address of this family's instance for `port`.
    pub fn register(self, port: Port) -> u8 {
        let (a, b) = match self {
            RegisterFamily::Direction => (reg::IODIRA, reg::IODIRB),
            RegisterFamily::Polarity => (reg::IPOLA, reg::IPOLB),
            RegisterFamily::InterruptEnable => (reg::GPINTENA, reg::GPINTENB),
            RegisterFamily::DefaultValue => (reg::DEFVALA, reg::DEFVALB),
            RegisterFamily::InterruptControl => (reg::INTCONA, reg::INTCONB),
            RegisterFamily::Config => (reg::IOCONA, reg::IOCONB),
            RegisterFamily::PullUp => (reg::GPPUA, reg::GPPUB),
            RegisterFamily::InterruptFlag => (reg::INTFA, reg::INTFB),
            RegisterFamily::InterruptCapture => (reg::INTCAPA, reg::INTCAPB),
            RegisterFamily::Gpio => (reg::GPIOA, reg::GPIOB),
            RegisterFamily::OutputLatch => (reg::OLATA, reg::OLATB),
        };
        match port {
            Port::A => a,
            Port::B => b,
        }
    }
}

const PIN_DESCRIPTIONS: [&str; consts::PIN_COUNT as usize] = [
    "GPIOA0", "GPIOA1", "GPIOA2", "GPIOA3", "GPIOA4", "GPIOA5", "GPIOA6", "GPIOA7", "GPIOB0",
    "GPIOB1", "GPIOB2", "GPIOB3", "GPIOB4", "GPIOB5", "GPIOB6", "GPIOB7",
];

/// Represents a valid logical pin number (0-15).
/// Use `Pin::new(num)` or one of the named constants to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pin(u8);

impl Pin {
    pub const GPA0: Pin = Pin(0);
    pub const GPA1: Pin = Pin(1);
    pub const GPA2: Pin = Pin(2);
    pub const GPA3: Pin = Pin(3);
    pub const GPA4: Pin = Pin(4);
    pub const GPA5: Pin = Pin(5);
    pub const GPA6: Pin = Pin(6);
    pub const GPA7: Pin = Pin(7);
    pub const GPB0: Pin = Pin(8);
    pub const GPB1: Pin = Pin(9);
    pub const GPB2: Pin = Pin(10);
    pub const GPB3: Pin = Pin(11);
    pub const GPB4: Pin = Pin(12);
    pub const GPB5: Pin = Pin(13);
    pub const GPB6: Pin = Pin(14);
    pub const GPB7: Pin = Pin(15);

    /// Creates a new Pin, returning an error if the number is out of range (0-15).
    pub fn new(pin_num: u8) -> Result<Self> {
        if pin_num < consts::PIN_COUNT {
            Ok(Pin(pin_num))
        } else {
            Err(Error::PinOutOfRange { pin: pin_num })
        }
    }

    /// Pin at `bit_offset` (0-7) of `port`.
    pub fn from_port(port: Port, bit_offset: u8) -> Result<Self> {
        if bit_offset >= consts::PINS_PER_PORT {
            return Err(Error::PinOutOfRange {
                pin: (port.index() * consts::PINS_PER_PORT).saturating_add(bit_offset),
            });
        }
        Ok(Pin(port.index() * consts::PINS_PER_PORT + bit_offset))
    }

    /// All 16 pins in ascending order.
    pub fn all() -> impl Iterator<Item = Pin> {
        (0..consts::PIN_COUNT).map(Pin)
    }

    /// Returns the underlying pin number (0-15).
    #[inline]
    pub fn index(&self) -> u8 {
        self.0
    }

    /// Returns the port the pin belongs to.
    #[inline]
    pub fn port(&self) -> Port {
        if self.0 < consts::PINS_PER_PORT {
            Port::A
        } else {
            Port::B
        }
    }

    /// Returns the bit offset (0-7) within the port's registers.
    #[inline]
    pub fn bit_offset(&self) -> u8 {
        self.0 % consts::PINS_PER_PORT
    }

    /// Returns the bit mask (1 << bit_offset) for register operations.
    #[inline]
    pub fn mask(&self) -> u8 {
        1u8 << self.bit_offset()
    }

    /// Human-readable label, "GPIOA0" through "GPIOB7".
    pub fn description(&self) -> &'static str {
        PIN_DESCRIPTIONS[self.0 as usize]
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl TryFrom<u8> for Pin {
    type Error = Error;

    fn try_from(pin_num: u8) -> Result<Self> {
        Pin::new(pin_num)
    }
}

/// Anything the pin operations accept as a pin: a [`Pin`] or a raw index.
pub trait IntoPin {
    fn into_pin(self) -> Result<Pin>;
}

impl IntoPin for Pin {
    #[inline]
    fn into_pin(self) -> Result<Pin> {
        Ok(self)
    }
}

impl IntoPin for u8 {
    #[inline]
    fn into_pin(self) -> Result<Pin> {
        Pin::new(self)
    }
}

/// Maps a pin to the register holding it within `family`, and its bit offset there.
pub fn locate(pin: impl IntoPin, family: RegisterFamily) -> Result<(u8, u8)> {
    let pin = pin.into_pin()?;
    Ok((family.register(pin.port()), pin.bit_offset()))
}

/// Returns `value` with bit `offset` replaced by `bit`; all other bits unchanged.
#[inline]
pub fn update_bit(value: u8, offset: u8, bit: bool) -> u8 {
    debug_assert!(offset < 8, "bit offset {} out of range", offset);
    (value & !(1 << offset)) | ((bit as u8) << offset)
}

impl<'cb, T: Transport> Mcp23017<'cb, T> {
    /// Read-modify-write of one bit in the `family` register that holds `pin`.
    /// Skips the write when the bit already has the requested value.
    pub(crate) fn modify_pin_bit(
        &mut self,
        pin: Pin,
        family: RegisterFamily,
        bit: bool,
    ) -> Result<()> {
        let register = family.register(pin.port());
        let current = self.read_register(register)?;
        let new_val = update_bit(current, pin.bit_offset(), bit);
        if new_val != current {
            self.write_register(register, &[new_val])?;
        } else {
            trace!("{:?} bit for pin {} already {}", family, pin, bit as u8);
        }
        Ok(())
    }

    /// Sets the direction (and pull-up, for [`PinMode::PulledUpInput`]) of a pin.
    ///
    /// `Input` and `Output` only touch the direction register; a pull-up
    /// enabled earlier stays enabled.
    pub fn pin_mode(&mut self, pin: impl IntoPin, mode: PinMode) -> Result<()> {
        let pin = pin.into_pin()?;
        debug!("Setting pin {} mode: {:?}", pin, mode);
        let input = mode != PinMode::Output;
        self.modify_pin_bit(pin, RegisterFamily::Direction, input)?;
        if mode == PinMode::PulledUpInput {
            self.modify_pin_bit(pin, RegisterFamily::PullUp, true)?;
        }
        self.pins[pin.index() as usize].mode = Some(mode);
        Ok(())
    }

    /// Inverts (or restores) the logic level a pin reports in GPIO reads.
    pub fn set_input_polarity(&mut self, pin: impl IntoPin, inverted: bool) -> Result<()> {
        let pin = pin.into_pin()?;
        debug!("Setting pin {} input polarity inverted={}", pin, inverted);
        self.modify_pin_bit(pin, RegisterFamily::Polarity, inverted)
    }

    /// Drives a pin High or Low. The pin should already be an output; writes
    /// to input pins are accepted and have no electrical effect.
    pub fn digital_write(&mut self, pin: impl IntoPin, level: PinLevel) -> Result<()> {
        let pin = pin.into_pin()?;
        let register = RegisterFamily::Gpio.register(pin.port());
        let current = self.read_register(register)?;
        let new_val = update_bit(current, pin.bit_offset(), level.is_high());
        trace!(
            "Writing pin {} {:?} (reg 0x{:02X}: 0x{:02X} -> 0x{:02X})",
            pin,
            level,
            register,
            current,
            new_val
        );
        self.write_register(register, &[new_val])
    }

    /// Reads the current level of a pin.
    pub fn digital_read(&mut self, pin: impl IntoPin) -> Result<PinLevel> {
        let pin = pin.into_pin()?;
        let value = self.read_register(RegisterFamily::Gpio.register(pin.port()))?;
        Ok(PinLevel::from(value & pin.mask() != 0))
    }

    /// Reads all eight levels of a port at once (bit n = pin n of the port).
    pub fn read_port(&mut self, port: Port) -> Result<u8> {
        self.read_register(RegisterFamily::Gpio.register(port))
    }

    /// Writes all eight output levels of a port at once.
    pub fn write_port(&mut self, port: Port, value: u8) -> Result<()> {
        debug!("Writing port {:?} = 0x{:02X}", port, value);
        self.write_register(RegisterFamily::Gpio.register(port), &[value])
    }

    /// Human-readable label for a pin.
    pub fn pin_description(&self, pin: impl IntoPin) -> Result<&'static str> {
        Ok(pin.into_pin()?.description())
    }
}
