//! Notification payload and pairing identifiers.
//!
//! The link carries one unsigned byte per notification - the raw
//! [`ButtonState`] mask. The service and characteristic identifiers are
//! fixed 128-bit values; the two nodes never pair unless both match
//! exactly.

use crate::buttons::ButtonState;

/// Exact length of a valid state notification.
pub const STATE_PAYLOAD_LEN: usize = 1;

/// Opaque 128-bit identifier used for pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Uuid128(pub [u8; 16]);

impl Uuid128 {
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl core::fmt::Display for Uuid128 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7], b[8], b[9], b[10], b[11], b[12], b[13],
            b[14], b[15]
        )
    }
}

/// Service advertised by the controller-side node.
pub const PAD_SERVICE_UUID: Uuid128 = Uuid128([
    0x12, 0x34, 0x56, 0x78, 0x12, 0x34, 0x12, 0x34, 0x12, 0x34, 0x12, 0x34, 0x56, 0x78, 0x90, 0xab,
]);

/// Characteristic carrying the button-state notifications.
pub const PAD_STATE_UUID: Uuid128 = Uuid128([
    0xab, 0xcd, 0xef, 0xab, 0x12, 0x34, 0x56, 0x78, 0x12, 0x34, 0xab, 0xcd, 0xef, 0xab, 0xcd, 0xef,
]);

/// Error type for payload decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Payload length differs from [`STATE_PAYLOAD_LEN`].
    Length,
}

/// Encode a button state into its notification payload.
#[inline]
#[must_use]
pub fn encode_state(state: ButtonState) -> [u8; STATE_PAYLOAD_LEN] {
    [state.raw()]
}

/// Decode a notification payload.
///
/// Anything other than exactly one byte is malformed; callers drop such
/// payloads without touching any state.
#[inline]
pub fn decode_state(payload: &[u8]) -> Result<ButtonState, DecodeError> {
    match payload {
        [raw] => Ok(ButtonState(*raw)),
        _ => Err(DecodeError::Length),
    }
}
