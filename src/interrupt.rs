//! Interrupt-on-change: arming pins and servicing them by polling.
//!
//! The driver never listens to the INTA/INTB lines itself. The caller invokes
//! [`Mcp23017::poll_interrupts`] at whatever cadence suits it (a periodic task,
//! a main loop, or after noticing INTA/INTB go active); callbacks run inline
//! on that call.

use crate::consts::iocon;
use crate::device::Mcp23017;
use crate::error::Result;
use crate::gpio::{update_bit, IntoPin, Pin, Port, PortGroup, RegisterFamily};
use crate::i2c::Transport;
use log::{debug, trace, warn};

/// Handler invoked with the pin that raised an interrupt.
pub type InterruptCallback<'cb> = Box<dyn FnMut(Pin) + 'cb>;

/// Condition that makes an armed pin dispatch its callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptMode {
    /// Pin reads low.
    LowLevel,
    /// Pin reads high.
    HighLevel,
    /// Pin changed and was captured high.
    Rising,
    /// Pin changed and was captured low.
    Falling,
    /// Pin changed in either direction.
    ChangeLevel,
}

impl InterruptMode {
    /// INTCON bit: `true` compares against DEFVAL, `false` against the previous value.
    #[inline]
    pub fn compares_against_default(self) -> bool {
        matches!(self, InterruptMode::LowLevel | InterruptMode::HighLevel)
    }

    /// DEFVAL bit for level modes. The chip flags a pin that differs from
    /// its DEFVAL bit, so the default is the opposite of the trigger level.
    pub fn default_value(self) -> Option<bool> {
        match self {
            InterruptMode::LowLevel => Some(true),
            InterruptMode::HighLevel => Some(false),
            InterruptMode::Rising | InterruptMode::Falling | InterruptMode::ChangeLevel => None,
        }
    }

    /// Whether a raised flag with captured level `captured_high` should dispatch.
    ///
    /// The chip has no edge-direction setting; edges are armed as change
    /// interrupts and told apart here by the INTCAP bit.
    pub fn should_dispatch(self, captured_high: bool) -> bool {
        match self {
            InterruptMode::LowLevel | InterruptMode::HighLevel | InterruptMode::ChangeLevel => {
                true
            }
            InterruptMode::Rising => captured_high,
            InterruptMode::Falling => !captured_high,
        }
    }
}

/// Device-wide INTA/INTB output settings, written to IOCON the first time a
/// pin is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptOutputConfig {
    /// Drive INTA/INTB high when active (ignored when `open_drain`).
    pub active_high: bool,
    /// Open-drain outputs instead of push-pull.
    pub open_drain: bool,
    /// OR both ports onto INTA and INTB.
    pub mirror: bool,
}

impl Default for InterruptOutputConfig {
    fn default() -> Self {
        Self::independent()
    }
}

impl InterruptOutputConfig {
    /// Active-high push-pull outputs; port A raises INTA, port B raises INTB.
    pub fn independent() -> Self {
        Self {
            active_high: true,
            open_drain: false,
            mirror: false,
        }
    }

    /// Active-high push-pull outputs, either port raising both INTA and INTB.
    pub fn mirrored() -> Self {
        Self {
            mirror: true,
            ..Self::independent()
        }
    }

    /// Applies these settings to an IOCON value, keeping unrelated bits and
    /// forcing BANK = 0.
    pub fn apply(self, iocon_value: u8) -> u8 {
        let mut value = iocon_value & !iocon::BANK;
        value = update_bit(value, iocon::MIRROR.trailing_zeros() as u8, self.mirror);
        value = update_bit(value, iocon::ODR.trailing_zeros() as u8, self.open_drain);
        update_bit(value, iocon::INTPOL.trailing_zeros() as u8, self.active_high)
    }
}

impl<'cb, T: Transport> Mcp23017<'cb, T> {
    /// Writes the interrupt output settings to IOCON. Runs once per handle;
    /// later calls are no-ops.
    pub(crate) fn interrupt_config(&mut self) -> Result<()> {
        if self.interrupt_output_configured {
            return Ok(());
        }
        let register = RegisterFamily::Config.register(Port::A);
        let current = self.read_register(register)?;
        let new_val = self.interrupt_output.apply(current);
        debug!(
            "Configuring interrupt outputs {:?}: IOCON 0x{:02X} -> 0x{:02X}",
            self.interrupt_output, current, new_val
        );
        self.write_register(register, &[new_val])?;
        self.interrupt_output_configured = true;
        Ok(())
    }

    /// Arms interrupt-on-change for a pin and binds `callback` to it.
    ///
    /// Replaces any mode and callback previously bound to the pin. The first
    /// call on a handle also writes the interrupt output settings to IOCON.
    ///
    /// **Warning:** There is no rollback. If a register write fails part way,
    /// the pin may be left with interrupts enabled but its compare registers
    /// half-programmed, and the previous callback stays bound. Re-arm the pin
    /// after a failure.
    pub fn pin_mode_interrupt<F>(
        &mut self,
        pin: impl IntoPin,
        mode: InterruptMode,
        callback: F,
    ) -> Result<()>
    where
        F: FnMut(Pin) + 'cb,
    {
        let pin = pin.into_pin()?;
        debug!("Arming interrupt on pin {}: {:?}", pin, mode);

        self.interrupt_config()?;
        self.modify_pin_bit(pin, RegisterFamily::InterruptEnable, true)?;
        self.modify_pin_bit(
            pin,
            RegisterFamily::InterruptControl,
            mode.compares_against_default(),
        )?;
        if let Some(default_high) = mode.default_value() {
            self.modify_pin_bit(pin, RegisterFamily::DefaultValue, default_high)?;
        }

        let record = &mut self.pins[pin.index() as usize];
        record.trigger = Some(mode);
        record.callback = Some(Box::new(callback));
        Ok(())
    }

    /// Services pending interrupts on `group` and dispatches callbacks.
    ///
    /// For each port (A before B) reads INTF and, if any flag is set, INTCAP,
    /// which also clears the interrupt on the chip. Flagged pins with a bound
    /// callback are dispatched in ascending bit order when their mode is
    /// satisfied by the captured level.
    ///
    /// A failed register read ends the poll quietly (logged at `warn`); call
    /// again on the next cycle. Returns the number of callbacks run.
    pub fn poll_interrupts(&mut self, group: PortGroup) -> usize {
        let mut dispatched = 0;
        for &port in group.ports() {
            match self.poll_port(port) {
                Ok(n) => dispatched += n,
                Err(e) => {
                    warn!("Interrupt poll of port {:?} aborted: {}", port, e);
                    break;
                }
            }
        }
        dispatched
    }

    fn poll_port(&mut self, port: Port) -> Result<usize> {
        let flags = self.read_register(RegisterFamily::InterruptFlag.register(port))?;
        if flags == 0 {
            return Ok(0);
        }
        let captured = self.read_register(RegisterFamily::InterruptCapture.register(port))?;
        trace!(
            "Port {:?} INTF=0x{:02X} INTCAP=0x{:02X}",
            port,
            flags,
            captured
        );

        let mut dispatched = 0;
        for offset in 0..8u8 {
            if flags & (1 << offset) == 0 {
                continue;
            }
            let pin = Pin::from_port(port, offset)?;
            let record = &mut self.pins[pin.index() as usize];
            let (Some(mode), Some(callback)) = (record.trigger, record.callback.as_mut()) else {
                trace!("Pin {} flagged with no handler bound", pin);
                continue;
            };
            let captured_high = captured & (1 << offset) != 0;
            if mode.should_dispatch(captured_high) {
                trace!("Dispatching {:?} interrupt for pin {}", mode, pin);
                callback(pin);
                dispatched += 1;
            }
        }
        Ok(dispatched)
    }
}
