//! Wire types and pairing constants for the wireless NES pad bridge.
//!
//! Both bridge nodes share this crate: the controller-side node encodes
//! sampled button states into single-byte notifications, the console-side
//! node decodes them and feeds its pad emulation. The crate also carries
//! the fixed pairing identifiers the two radios match on, plus the frame
//! encoding for the external pad visualizer tool.
//!
//! # Overview
//!
//! - [`buttons`]: the 8-bit button mask ([`ButtonState`])
//! - [`wire`]: notification payload encode/decode and pairing identifiers
//! - [`mapping`]: the button-remapping seam ([`StateMapper`])
//! - [`visualizer`]: diagnostic frame encoding for the host-side viewer
//!
//! # Wire format
//!
//! A notification carries exactly one unsigned byte: the raw button mask,
//! bit0..bit7 = A, B, Select, Start, Up, Down, Left, Right, 1 = pressed.
//! Only changed states are transmitted; a payload of any other length is
//! malformed and must be dropped by the receiver without side effects.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod buttons;
pub mod mapping;
pub mod visualizer;
pub mod wire;

// Re-export main types at crate root
pub use buttons::ButtonState;
pub use mapping::{identity, StateMapper};
pub use visualizer::{encode_frame, FRAME_LEN, FRAME_TERMINATOR};
pub use wire::{
    decode_state, encode_state, DecodeError, Uuid128, PAD_SERVICE_UUID, PAD_STATE_UUID,
    STATE_PAYLOAD_LEN,
};
