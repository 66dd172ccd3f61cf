//! Arms a few pins and services them from a polling loop.
//!
//! Runs against a tiny in-memory register file standing in for the chip, so
//! it works without hardware. Swap `FakeChip` for `I2cTransport::new(your_i2c)`
//! to drive a real MCP23017.
//!
//! Run with `RUST_LOG=trace cargo run --example poll_interrupts` to see every
//! register transaction.

use mcp23017_i2c::registers::{INTCAPA, INTCAPB, INTFA, INTFB};
use mcp23017_i2c::{
    BusError, DeviceAddress, InterruptMode, Mcp23017, Pin, PinLevel, PinMode, PortGroup, Result,
    Transport,
};
use std::{thread, time::Duration};

struct FakeChip {
    regs: [u8; 0x16],
}

impl Transport for FakeChip {
    fn write(&mut self, _address: u8, register: u8, bytes: &[u8]) -> std::result::Result<(), BusError> {
        for (i, b) in bytes.iter().enumerate() {
            self.regs[register as usize + i] = *b;
        }
        Ok(())
    }

    fn read(
        &mut self,
        _address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> std::result::Result<usize, BusError> {
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = self.regs[register as usize + i];
        }
        // Reading INTCAP clears the interrupt.
        match register {
            INTCAPA => self.regs[INTFA as usize] = 0,
            INTCAPB => self.regs[INTFB as usize] = 0,
            _ => {}
        }
        Ok(buffer.len())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut chip = FakeChip { regs: [0; 0x16] };
    chip.regs[0x00] = 0xFF;
    chip.regs[0x01] = 0xFF;

    let mut expander = Mcp23017::new(&mut chip, DeviceAddress::default())?;

    expander.pin_mode(Pin::GPA0, PinMode::Output)?;
    expander.digital_write(Pin::GPA0, PinLevel::High)?;
    println!("{} is {:?}", Pin::GPA0, expander.digital_read(Pin::GPA0)?);

    for pin in [Pin::GPA1, Pin::GPB2] {
        expander.pin_mode(pin, PinMode::PulledUpInput)?;
    }
    expander.pin_mode_interrupt(Pin::GPA1, InterruptMode::ChangeLevel, |pin| {
        println!("{} changed", pin)
    })?;
    expander.pin_mode_interrupt(Pin::GPB2, InterruptMode::Falling, |pin| {
        println!("{} fell", pin)
    })?;

    for cycle in 0..3u8 {
        // Simulate the chip latching events between polls.
        expander.write_register(INTFA, &[0x02])?;
        expander.write_register(INTCAPA, &[cycle & 0x02])?;
        expander.write_register(INTFB, &[0x04])?;
        expander.write_register(INTCAPB, &[if cycle % 2 == 0 { 0x00 } else { 0x04 }])?;

        let dispatched = expander.poll_interrupts(PortGroup::Both);
        println!("cycle {}: {} callback(s)", cycle, dispatched);
        thread::sleep(Duration::from_millis(100));
    }

    Ok(())
}
