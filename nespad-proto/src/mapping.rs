//! Button remapping seam.
//!
//! The wire byte already uses the console's bit order, so the default
//! mapper is a pass-through. The hook stays so a build can swap bits
//! without touching the receive path.

use crate::buttons::ButtonState;

/// Maps a received state to the state presented to the console.
pub type StateMapper = fn(ButtonState) -> ButtonState;

/// Default pass-through mapping.
#[inline]
#[must_use]
pub fn identity(state: ButtonState) -> ButtonState {
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_a_no_op() {
        for raw in 0..=u8::MAX {
            assert_eq!(identity(ButtonState(raw)), ButtonState(raw));
        }
    }
}
