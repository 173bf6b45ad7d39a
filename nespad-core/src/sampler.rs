//! Physical pad sampler for the controller-side node.
//!
//! Drives the pad connector's request/shift protocol: a strobe pulse
//! latches the buttons into the pad's register, then eight timed clock
//! cycles read them back over the data line. The data line is active-low,
//! so a low read stores a 1 ("pressed"); a floating line reads high and
//! yields released bits. Timing violations surface as wrong levels,
//! never as errors - only pin-level infrastructure failures propagate.
//!
//! The microsecond delays are calibrated to the connector's timing
//! budget and depend on the target's scheduling guarantees; validate
//! them on-device rather than assuming host-side timing.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use nespad_proto::ButtonState;

/// Strobe pulse width before each read burst, in microseconds.
pub const STROBE_PULSE_US: u32 = 12;

/// Settle time either side of each clock edge, in microseconds.
pub const BIT_SETTLE_US: u32 = 6;

/// Source of pad snapshots, polled at the node cadence.
///
/// This seam decouples the sender loop from the bit-bang sampler so
/// scripted sources can stand in for real hardware.
pub trait PadSource {
    type Error;

    /// Produce the next button-state snapshot.
    fn sample(&mut self) -> Result<ButtonState, Self::Error>;
}

/// Bit-bang sampler over the pad connector's strobe/clock/data lines.
pub struct PadSampler<L, C, D, T> {
    strobe: L,
    clock: C,
    data: D,
    delay: T,
}

impl<L, C, D, T> PadSampler<L, C, D, T> {
    pub fn new(strobe: L, clock: C, data: D, delay: T) -> Self {
        Self {
            strobe,
            clock,
            data,
            delay,
        }
    }

    /// Decompose the sampler into its pins and delay.
    pub fn into_parts(self) -> (L, C, D, T) {
        (self.strobe, self.clock, self.data, self.delay)
    }
}

impl<L, C, D, T, E> PadSource for PadSampler<L, C, D, T>
where
    L: OutputPin<Error = E>,
    C: OutputPin<Error = E>,
    D: InputPin<Error = E>,
    T: DelayNs,
{
    type Error = E;

    fn sample(&mut self) -> Result<ButtonState, E> {
        let mut bits = 0u8;
        self.strobe.set_high()?;
        self.delay.delay_us(STROBE_PULSE_US);
        self.strobe.set_low()?;
        for index in 0..8 {
            self.clock.set_low()?;
            self.delay.delay_us(BIT_SETTLE_US);
            if self.data.is_low()? {
                bits |= 1 << index;
            }
            self.clock.set_high()?;
            self.delay.delay_us(BIT_SETTLE_US);
        }
        Ok(ButtonState(bits))
    }
}
