//! Internal constants, register addresses, and bit definitions.
//!
//! Addresses are for IOCON.BANK = 0, the power-on layout, where the A and B
//! instances of every register sit next to each other (A even, B odd).
//! This driver never sets BANK.

// --- Device Addressing ---
/// Lowest 7-bit address the chip answers on (A2 = A1 = A0 = 0).
pub const ADDRESS_MIN: u8 = 0x20;
/// Highest 7-bit address the chip answers on (A2 = A1 = A0 = 1).
pub const ADDRESS_MAX: u8 = 0x27;
/// Address with all three strap pins pulled high.
pub const DEFAULT_ADDRESS: u8 = 0x27;

// --- Pin Layout ---
pub const PIN_COUNT: u8 = 16;
pub const PINS_PER_PORT: u8 = 8;

// --- Register Addresses (BANK = 0) ---
pub mod reg {
    /// I/O direction: 1 = input, 0 = output. Resets to 0xFF.
    pub const IODIRA: u8 = 0x00;
    pub const IODIRB: u8 = 0x01;
    /// Input polarity: 1 = GPIO bit reads inverted.
    pub const IPOLA: u8 = 0x02;
    pub const IPOLB: u8 = 0x03;
    /// Interrupt-on-change enable.
    pub const GPINTENA: u8 = 0x04;
    pub const GPINTENB: u8 = 0x05;
    /// Default compare value; a pin differing from its DEFVAL bit raises a flag
    /// when the matching INTCON bit is set.
    pub const DEFVALA: u8 = 0x06;
    pub const DEFVALB: u8 = 0x07;
    /// Interrupt control: 1 = compare against DEFVAL, 0 = compare against previous value.
    pub const INTCONA: u8 = 0x08;
    pub const INTCONB: u8 = 0x09;
    /// Device configuration. Both addresses access the same register.
    pub const IOCONA: u8 = 0x0A;
    pub const IOCONB: u8 = 0x0B;
    /// Weak (100k) pull-up enable.
    pub const GPPUA: u8 = 0x0C;
    pub const GPPUB: u8 = 0x0D;
    /// Interrupt flags (read-only): 1 = pin caused the pending interrupt.
    pub const INTFA: u8 = 0x0E;
    pub const INTFB: u8 = 0x0F;
    /// Port value captured when the interrupt fired. Reading clears the interrupt.
    pub const INTCAPA: u8 = 0x10;
    pub const INTCAPB: u8 = 0x11;
    /// Port value. Writes land in OLAT.
    pub const GPIOA: u8 = 0x12;
    pub const GPIOB: u8 = 0x13;
    /// Output latches.
    pub const OLATA: u8 = 0x14;
    pub const OLATB: u8 = 0x15;
}

// --- IOCON Bits ---
pub mod iocon {
    pub const BANK: u8 = 1 << 7;
    /// INTA and INTB are OR'ed together.
    pub const MIRROR: u8 = 1 << 6;
    /// Sequential operation disabled (address pointer does not increment).
    #[allow(dead_code)]
    pub const SEQOP: u8 = 1 << 5;
    #[allow(dead_code)]
    pub const DISSLW: u8 = 1 << 4;
    #[allow(dead_code)]
    pub const HAEN: u8 = 1 << 3;
    /// Interrupt pins are open-drain (overrides INTPOL).
    pub const ODR: u8 = 1 << 2;
    /// Interrupt pins are active-high.
    pub const INTPOL: u8 = 1 << 1;
}
