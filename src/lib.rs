//! # mcp23017-i2c
//!
//! A Rust crate for driving the Microchip MCP23017 16-bit I/O expander over
//! I²C (two-wire) buses.
//!
//! The bus itself is abstracted behind the [`Transport`] trait; any
//! `embedded-hal` 1.0 blocking I²C bus plugs in through [`I2cTransport`].
//!
//! ## Features
//!
//! *   Validated device addressing (0x20-0x27, or from the A2/A1/A0 straps).
//! *   Strongly-typed `Pin` (GPA0-GPA7 = 0-7, GPB0-GPB7 = 8-15).
//! *   Pin configuration: input, output, pulled-up input, input polarity.
//! *   Reading/writing single pins and whole ports.
//! *   Interrupt-on-change per pin: low level, high level, rising edge,
//!     falling edge, or any change, each bound to a callback.
//! *   Poll-driven interrupt servicing (`poll_interrupts`).
//! *   Pin labels ("GPIOA0".."GPIOB7").
//!
//! ## Concurrency model
//!
//! Everything is synchronous and single-threaded. Each call performs zero or
//! more blocking register transactions and returns. The driver never spawns
//! a background poller and never services the INTA/INTB lines: call
//! [`Mcp23017::poll_interrupts`] repeatedly from your own loop or task.
//! Callbacks run inline inside that call, so a slow callback delays every
//! later dispatch.
//!
//! ## Register access
//!
//! There is no shadow copy of the chip's registers. Every configuration call
//! reads the register it is about to modify, so bits belonging to other pins
//! (or changed by another bus master) are preserved.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use mcp23017_i2c::{
//!     DeviceAddress, I2cTransport, InterruptMode, Mcp23017, Pin, PinLevel, PinMode, PortGroup,
//!     Result,
//! };
//!
//! fn run<I2C: embedded_hal::i2c::I2c>(i2c: I2C) -> Result<()> {
//!     let mut expander = Mcp23017::new(I2cTransport::new(i2c), DeviceAddress::default())?;
//!
//!     expander.pin_mode(Pin::GPA0, PinMode::Output)?;
//!     expander.digital_write(Pin::GPA0, PinLevel::High)?;
//!
//!     expander.pin_mode(Pin::GPB2, PinMode::PulledUpInput)?;
//!     expander.pin_mode_interrupt(Pin::GPB2, InterruptMode::Falling, |pin| {
//!         println!("{} pressed", pin);
//!     })?;
//!
//!     loop {
//!         expander.poll_interrupts(PortGroup::Both);
//!     }
//! }
//! ```
//!
//! ## License
//!
//! This project is licensed under the MIT license.

mod consts;
pub mod device;
mod error;
pub mod gpio;
pub mod i2c;
pub mod interrupt;

pub use device::{Mcp23017, PinState};
pub use error::{status_code, Error, ErrorKind, Result};
pub use gpio::{
    locate, update_bit, IntoPin, Pin, PinLevel, PinMode, Port, PortGroup, RegisterFamily,
};
pub use i2c::{BusError, DeviceAddress, I2cTransport, Transport};
pub use interrupt::{InterruptCallback, InterruptMode, InterruptOutputConfig};

/// Register addresses (BANK = 0 layout), for use with
/// [`Mcp23017::read_register`] and [`Mcp23017::write_register`].
pub mod registers {
    pub use crate::consts::reg::*;
}
