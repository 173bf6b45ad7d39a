//! Controller-side node loop.
//!
//! One cooperative polling context: track the single subscriber, sample
//! the physical pad at a fixed cadence and push the state over the link
//! only when it changed since the last transmission. Identical samples
//! produce no radio traffic at all.

use log::{debug, info};
use nespad_proto::{wire, ButtonState, PAD_SERVICE_UUID};

use crate::link::{LinkError, PeripheralEvent, PeripheralRadio};
use crate::sampler::PadSource;

/// Sampling cadence of the polling loop, roughly 120 Hz.
pub const POLL_PERIOD_MS: u32 = 8;

/// Error type for sender operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderError<E> {
    /// The pad sampler failed at the pin level.
    Source(E),
    /// The radio rejected a notification.
    Link(LinkError),
}

/// Advertising node that forwards pad state changes to its subscriber.
pub struct SenderNode<R, S> {
    radio: R,
    source: S,
    last_sent: Option<ButtonState>,
    subscriber: bool,
}

impl<R: PeripheralRadio, S: PadSource> SenderNode<R, S> {
    pub fn new(radio: R, source: S) -> Self {
        Self {
            radio,
            source,
            last_sent: None,
            subscriber: false,
        }
    }

    /// Present the pad service to scanners.
    pub fn start(&mut self) -> Result<(), LinkError> {
        self.radio.start_advertising(PAD_SERVICE_UUID)
    }

    /// Whether a console node is currently subscribed.
    #[must_use]
    pub fn has_subscriber(&self) -> bool {
        self.subscriber
    }

    /// One cooperative iteration: track the subscriber, sample the pad,
    /// push the state if it changed.
    ///
    /// `last_sent` only advances when a notification actually went out,
    /// so a state change during an outage is delivered as soon as a
    /// subscriber is back.
    pub fn poll_once(&mut self) -> Result<(), SenderError<S::Error>> {
        while let Some(event) = self.radio.poll_event() {
            match event {
                PeripheralEvent::Connected => {
                    info!("console node subscribed");
                    self.subscriber = true;
                }
                PeripheralEvent::Disconnected => {
                    info!("console node dropped");
                    self.subscriber = false;
                }
            }
        }

        let state = self.source.sample().map_err(SenderError::Source)?;
        if self.subscriber && self.last_sent != Some(state) {
            self.radio
                .notify(&wire::encode_state(state))
                .map_err(SenderError::Link)?;
            debug!("notified {:#04x}", state.raw());
            self.last_sent = Some(state);
        }
        Ok(())
    }

    /// Get a mutable reference to the radio.
    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// Decompose the node into its radio and source.
    pub fn into_parts(self) -> (R, S) {
        (self.radio, self.source)
    }
}
