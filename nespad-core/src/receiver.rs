//! Console-side node loop.
//!
//! The cooperative half of the console node: drain transport events,
//! route connection lifecycle into the [`LinkSupervisor`], deliver
//! notifications into the shared [`PadStateCell`] and emit one
//! visualizer frame per iteration. The interrupt half lives in
//! [`PadShifter`](crate::shifter::PadShifter) and touches nothing here
//! but the cell.

use log::debug;
use nespad_proto::{mapping, visualizer, wire, StateMapper};

use crate::link::{CentralEvent, CentralRadio, LinkError};
use crate::state::PadStateCell;
use crate::supervisor::LinkSupervisor;

/// Poll cadence of the cooperative loop, roughly 100 Hz. The visualizer
/// emits one frame per iteration at this rate.
pub const POLL_PERIOD_MS: u32 = 10;

/// Sink for the diagnostic visualizer stream.
pub trait VisualizerSink {
    fn emit(&mut self, frame: &[u8; visualizer::FRAME_LEN]);
}

/// Builds without the debug stream plug in `()`.
impl VisualizerSink for () {
    fn emit(&mut self, _frame: &[u8; visualizer::FRAME_LEN]) {}
}

/// Scanning node that feeds received pad state to the shift engine.
pub struct ReceiverNode<'a, R, V> {
    radio: R,
    supervisor: LinkSupervisor,
    cell: &'a PadStateCell,
    map: StateMapper,
    visualizer: V,
    last_raw: Option<u8>,
}

impl<'a, R: CentralRadio, V: VisualizerSink> ReceiverNode<'a, R, V> {
    pub fn new(radio: R, cell: &'a PadStateCell, visualizer: V) -> Self {
        Self::with_mapper(radio, cell, visualizer, mapping::identity)
    }

    /// Like [`new`](Self::new) with a custom button remapping.
    pub fn with_mapper(
        radio: R,
        cell: &'a PadStateCell,
        visualizer: V,
        map: StateMapper,
    ) -> Self {
        Self {
            radio,
            supervisor: LinkSupervisor::new(),
            cell,
            map,
            visualizer,
            last_raw: None,
        }
    }

    /// Begin discovery of the controller-side node.
    pub fn start(&mut self) -> Result<(), LinkError> {
        self.supervisor.start(&mut self.radio)
    }

    /// One cooperative iteration: drain transport events, run a deferred
    /// connect step, emit one visualizer frame.
    pub fn poll_once(&mut self) {
        while let Some(event) = self.radio.poll_event() {
            match event {
                CentralEvent::Notification(payload) => self.on_notification(&payload),
                event => self.supervisor.handle_event(event, &mut self.radio),
            }
        }
        self.supervisor.drive(&mut self.radio);
        self.visualizer
            .emit(&visualizer::encode_frame(self.cell.current()));
    }

    /// Deliver one inbound payload from the notification path.
    ///
    /// Malformed payloads are dropped without touching any state.
    fn on_notification(&mut self, payload: &[u8]) {
        let Ok(raw) = wire::decode_state(payload) else {
            return;
        };
        let mapped = (self.map)(raw);
        if self.last_raw != Some(raw.raw()) {
            debug!("raw={:#04x} mapped={:#04x}", raw.raw(), mapped.raw());
            self.last_raw = Some(raw.raw());
        }
        self.cell.publish(mapped);
    }

    #[must_use]
    pub fn supervisor(&self) -> &LinkSupervisor {
        &self.supervisor
    }

    /// Get a mutable reference to the radio.
    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// Decompose the node into its radio and visualizer sink.
    pub fn into_parts(self) -> (R, V) {
        (self.radio, self.visualizer)
    }
}
