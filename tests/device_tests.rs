//! Bring-up and exact bus traffic through the embedded-hal transport.

mod common;

use std::cell::Cell;

use common::SimBus;
use embedded_hal::i2c::{ErrorKind as I2cErrorKind, NoAcknowledgeSource};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use mcp23017_i2c::{
    status_code, BusError, DeviceAddress, Error, ErrorKind, I2cTransport, InterruptMode,
    Mcp23017, Pin, PinLevel, PinMode, PortGroup,
};

#[test]
fn test_bring_up_probes_device() {
    let bus = SimBus::new(0x24);
    let device = Mcp23017::new(bus.clone(), DeviceAddress::from_pins(true, false, false)).unwrap();
    assert_eq!(device.address().value(), 0x24);
    assert_eq!(bus.ops().len(), 1);
}

#[test]
fn test_bring_up_fails_without_ack() {
    let bus = SimBus::new(0x21);
    let result = Mcp23017::new(bus, DeviceAddress::new(0x22).unwrap());
    let err = result.unwrap_err();
    assert!(matches!(
        err,
        Error::DeviceNotResponding {
            address: 0x22,
            source: BusError::Nack
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Address);
    assert_eq!(err.kind().code(), -3);
}

#[test]
fn test_bring_up_rejects_short_probe() {
    let bus = SimBus::new(0x27);
    bus.short_read(mcp23017_i2c::registers::IOCONA);
    let err = Mcp23017::new(bus, DeviceAddress::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Address);
}

#[test]
fn test_address_outside_window() {
    let result = DeviceAddress::new(0x28);
    assert_eq!(status_code(&result), -3);
    assert!(matches!(result, Err(Error::InvalidAddress { address: 0x28 })));
}

#[test]
fn test_release_returns_transport() {
    let bus = SimBus::new(0x27);
    let device = Mcp23017::new(bus.clone(), DeviceAddress::default()).unwrap();
    let released = device.release();
    released.set_reg(0x12, 0x42);
    assert_eq!(bus.reg(0x12), 0x42);
}

#[test]
fn test_pin_state_defaults() {
    let bus = SimBus::new(0x27);
    let device = Mcp23017::new(bus, DeviceAddress::default()).unwrap();
    for pin in Pin::all() {
        let state = device.pin_state(pin).unwrap();
        assert_eq!(state.mode, None);
        assert_eq!(state.interrupt, None);
        assert!(!state.has_callback);
    }
    assert!(device.pin_state(16u8).is_err());
}

#[test]
fn test_i2c_transaction_sequence() {
    let expectations = [
        // probe
        I2cTransaction::write_read(0x27, vec![0x0A], vec![0x00]),
        // GPA0 output
        I2cTransaction::write_read(0x27, vec![0x00], vec![0xFF]),
        I2cTransaction::write(0x27, vec![0x00, 0xFE]),
        // GPA0 high
        I2cTransaction::write_read(0x27, vec![0x12], vec![0x00]),
        I2cTransaction::write(0x27, vec![0x12, 0x01]),
        // arm GPB2 rising: IOCON, GPINTENB, INTCONB (already 0, no write)
        I2cTransaction::write_read(0x27, vec![0x0A], vec![0x00]),
        I2cTransaction::write(0x27, vec![0x0A, 0x02]),
        I2cTransaction::write_read(0x27, vec![0x05], vec![0x00]),
        I2cTransaction::write(0x27, vec![0x05, 0x04]),
        I2cTransaction::write_read(0x27, vec![0x09], vec![0x00]),
        // poll port B
        I2cTransaction::write_read(0x27, vec![0x0F], vec![0x04]),
        I2cTransaction::write_read(0x27, vec![0x11], vec![0x04]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let fired = Cell::new(None);

    {
        let mut device =
            Mcp23017::new(I2cTransport::new(i2c.clone()), DeviceAddress::default()).unwrap();
        device.pin_mode(Pin::GPA0, PinMode::Output).unwrap();
        device.digital_write(Pin::GPA0, PinLevel::High).unwrap();
        device
            .pin_mode_interrupt(Pin::GPB2, InterruptMode::Rising, |pin| fired.set(Some(pin)))
            .unwrap();
        assert_eq!(device.poll_interrupts(PortGroup::B), 1);
    }

    assert_eq!(fired.get(), Some(Pin::GPB2));
    i2c.done();
}

#[test]
fn test_i2c_nack_surfaces_as_register_error() {
    let expectations = [
        I2cTransaction::write_read(0x20, vec![0x0A], vec![0x00]),
        I2cTransaction::write_read(0x20, vec![0x13], vec![0x00])
            .with_error(I2cErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)),
    ];
    let mut i2c = I2cMock::new(&expectations);

    let mut device = Mcp23017::new(
        I2cTransport::new(i2c.clone()),
        DeviceAddress::from_pins(false, false, false),
    )
    .unwrap();
    let err = device.digital_read(Pin::GPB1).unwrap_err();
    assert!(matches!(
        err,
        Error::RegisterRead {
            register: 0x13,
            source: BusError::Nack
        }
    ));

    i2c.done();
}
