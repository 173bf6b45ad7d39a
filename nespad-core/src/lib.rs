//! Protocol engines and link session logic for the wireless NES pad bridge.
//!
//! Two embedded nodes bridge a wired pad connector over a short-range
//! radio: the controller-side node samples the physical pad and pushes
//! single-byte state notifications, the console-side node replays an
//! equivalent shift-register protocol toward the console from state that
//! arrives asynchronously over the link.
//!
//! # Architecture
//!
//! Controller side (one cooperative polling context):
//!
//! - [`PadSampler`] bit-bangs the pad's request/shift protocol
//! - [`SenderNode`] advertises, tracks its single subscriber and pushes a
//!   notification only when the sampled state changed
//!
//! Console side (two execution contexts):
//!
//! - [`ReceiverNode`] runs in the cooperative context: it drives the
//!   [`LinkSupervisor`] state machine, routes inbound notifications into
//!   the shared [`PadStateCell`] and emits one visualizer frame per poll
//! - [`PadShifter`] runs in interrupt context: its strobe/clock edge
//!   handlers serialize the latched state onto the console's data line
//!
//! The two console-side contexts share nothing but the [`PadStateCell`],
//! a lock-free cell with latest-value-wins semantics - late or backlogged
//! updates are discarded in favor of the newest, and a strobe observes
//! either the old or the new complete state, never a mix.
//!
//! The radio itself is an external collaborator reached through the
//! [`CentralRadio`] and [`PeripheralRadio`] capability traits; pins and
//! delays go through `embedded-hal`, so everything here runs unchanged on
//! hardware and under host tests.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # Re-exports
//!
//! The wire-level types from [`nespad_proto`] are re-exported so
//! consumers only need to depend on this crate.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod link;
pub mod receiver;
pub mod sampler;
pub mod sender;
pub mod shifter;
pub mod state;
pub mod supervisor;

pub use link::{
    CentralEvent, CentralRadio, LinkError, LinkSession, NotifyPayload, PeerAddr, PeripheralEvent,
    PeripheralRadio, MAX_NOTIFY_LEN,
};
pub use receiver::{ReceiverNode, VisualizerSink};
pub use sampler::{PadSampler, PadSource, BIT_SETTLE_US, STROBE_PULSE_US};
pub use sender::{SenderError, SenderNode};
pub use shifter::PadShifter;
pub use state::PadStateCell;
pub use supervisor::{LinkState, LinkSupervisor};

// Re-export wire types for convenience
pub use nespad_proto::{mapping, visualizer, wire};
pub use nespad_proto::{ButtonState, StateMapper, Uuid128, PAD_SERVICE_UUID, PAD_STATE_UUID};
