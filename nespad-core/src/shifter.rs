//! Console-facing shift-register engine.
//!
//! Two edge handlers reproduce the pad protocol toward the console: the
//! strobe's rising edge latches a parallel snapshot from the shared
//! cell, each falling clock edge shifts the next bit onto the data line.
//! The data line is active-low - a pressed button drives it low.
//!
//! Both handlers run in interrupt context with the console's clock
//! period in the tens of microseconds, so they complete in a handful of
//! register operations: no blocking, no allocation, no locks. Pin errors
//! are discarded; the console protocol offers no error channel.

use embedded_hal::digital::OutputPin;

use crate::state::PadStateCell;

/// Serializer for the console-facing data line.
pub struct PadShifter<'a, D: OutputPin> {
    cell: &'a PadStateCell,
    data: D,
    shift_reg: u8,
    bit_index: u8,
}

impl<'a, D: OutputPin> PadShifter<'a, D> {
    /// Take over the data line, releasing it high (no button reported).
    pub fn new(cell: &'a PadStateCell, mut data: D) -> Self {
        let _ = data.set_high();
        Self {
            cell,
            data,
            shift_reg: 0,
            bit_index: 0,
        }
    }

    /// Strobe rising edge: latch a fresh snapshot and present bit 0.
    pub fn on_strobe_rising(&mut self) {
        self.shift_reg = self.cell.latch().raw();
        self.bit_index = 0;
        self.drive_current_bit();
    }

    /// Clock falling edge: advance to the next bit.
    ///
    /// After the eighth bit is on the line further edges are ignored and
    /// the line holds its level until the next strobe.
    pub fn on_clock_falling(&mut self) {
        if self.bit_index < 7 {
            self.bit_index += 1;
            self.drive_current_bit();
            if self.bit_index == 7 {
                // last bit is out; forget the snapshot so a strobe that
                // arrives before any new packet cannot resend old data
                self.shift_reg = 0;
            }
        }
    }

    #[inline]
    fn drive_current_bit(&mut self) {
        if self.shift_reg & (1 << self.bit_index) != 0 {
            let _ = self.data.set_low();
        } else {
            let _ = self.data.set_high();
        }
    }

    /// Release the data line pin.
    pub fn into_data_pin(self) -> D {
        self.data
    }
}
