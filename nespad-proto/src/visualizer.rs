//! Frame encoding for the external pad visualizer.
//!
//! The console-side node emits one frame per polling iteration whether or
//! not the state changed, so the host tool always receives complete
//! packets: eight bytes of `0x01`/`0x00` (least significant bit first)
//! followed by a newline.

use crate::buttons::ButtonState;

/// Total frame length: eight level bytes plus the terminator.
pub const FRAME_LEN: usize = 9;

/// Terminator byte closing each frame.
pub const FRAME_TERMINATOR: u8 = b'\n';

/// Encode one visualizer frame.
#[must_use]
pub fn encode_frame(state: ButtonState) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    for (index, slot) in frame[..8].iter_mut().enumerate() {
        *slot = u8::from(state.bit(index as u8));
    }
    frame[8] = FRAME_TERMINATOR;
    frame
}
