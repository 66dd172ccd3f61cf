//! In-memory MCP23017 register file used as a `Transport` by the integration tests.
//!
//! Registers behave as plain storage, except that reading INTCAP clears the
//! matching INTF register, as on the real chip.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use mcp23017_i2c::registers;
use mcp23017_i2c::{BusError, Transport};

pub const REGISTER_COUNT: usize = 0x16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Write { register: u8, bytes: Vec<u8> },
    Read { register: u8, len: usize },
}

#[derive(Debug)]
pub struct SimState {
    pub address: u8,
    pub regs: [u8; REGISTER_COUNT],
    pub ops: Vec<Op>,
    /// Registers whose reads fail with a NACK.
    pub failing_reads: HashSet<u8>,
    /// Registers whose writes fail with a NACK.
    pub failing_writes: HashSet<u8>,
    /// Registers whose reads return no data.
    pub short_reads: HashSet<u8>,
}

/// Cloneable handle; all clones share one register file.
#[derive(Debug, Clone)]
pub struct SimBus(pub Rc<RefCell<SimState>>);

impl SimBus {
    pub fn new(address: u8) -> Self {
        let mut regs = [0u8; REGISTER_COUNT];
        regs[registers::IODIRA as usize] = 0xFF;
        regs[registers::IODIRB as usize] = 0xFF;
        SimBus(Rc::new(RefCell::new(SimState {
            address,
            regs,
            ops: Vec::new(),
            failing_reads: HashSet::new(),
            failing_writes: HashSet::new(),
            short_reads: HashSet::new(),
        })))
    }

    pub fn reg(&self, register: u8) -> u8 {
        self.0.borrow().regs[register as usize]
    }

    pub fn set_reg(&self, register: u8, value: u8) {
        self.0.borrow_mut().regs[register as usize] = value;
    }

    pub fn bit(&self, register: u8, offset: u8) -> bool {
        self.reg(register) & (1 << offset) != 0
    }

    /// Raises interrupt flags on a port together with the captured levels.
    pub fn raise(&self, flag_register: u8, capture_register: u8, flags: u8, captured: u8) {
        self.set_reg(flag_register, flags);
        self.set_reg(capture_register, captured);
    }

    pub fn ops(&self) -> Vec<Op> {
        self.0.borrow().ops.clone()
    }

    pub fn clear_ops(&self) {
        self.0.borrow_mut().ops.clear();
    }

    pub fn fail_reads(&self, register: u8) {
        self.0.borrow_mut().failing_reads.insert(register);
    }

    pub fn fail_writes(&self, register: u8) {
        self.0.borrow_mut().failing_writes.insert(register);
    }

    pub fn short_read(&self, register: u8) {
        self.0.borrow_mut().short_reads.insert(register);
    }
}

impl Transport for SimBus {
    fn write(&mut self, address: u8, register: u8, bytes: &[u8]) -> Result<(), BusError> {
        let mut state = self.0.borrow_mut();
        if address != state.address || state.failing_writes.contains(&register) {
            return Err(BusError::Nack);
        }
        state.ops.push(Op::Write {
            register,
            bytes: bytes.to_vec(),
        });
        for (i, byte) in bytes.iter().enumerate() {
            let idx = (register as usize + i) % REGISTER_COUNT;
            state.regs[idx] = *byte;
        }
        Ok(())
    }

    fn read(&mut self, address: u8, register: u8, buffer: &mut [u8]) -> Result<usize, BusError> {
        let mut state = self.0.borrow_mut();
        if address != state.address || state.failing_reads.contains(&register) {
            return Err(BusError::Nack);
        }
        state.ops.push(Op::Read {
            register,
            len: buffer.len(),
        });
        if state.short_reads.contains(&register) {
            return Ok(0);
        }
        for (i, slot) in buffer.iter_mut().enumerate() {
            let idx = (register as usize + i) % REGISTER_COUNT;
            *slot = state.regs[idx];
            if idx == registers::INTCAPA as usize {
                state.regs[registers::INTFA as usize] = 0;
            } else if idx == registers::INTCAPB as usize {
                state.regs[registers::INTFB as usize] = 0;
            }
        }
        Ok(buffer.len())
    }
}
