//! Reassembles the TV's byte stream into discrete response frames.
//!
//! The device terminates every response with `x` and is known to emit
//! spurious bytes (0xFF most commonly) that must not corrupt framing, so
//! anything outside the payload alphabet is dropped before it reaches the
//! buffer.

/// Terminator byte the TV appends to every response.
pub const TERMINATOR: u8 = b'x';

/// Byte-at-a-time frame accumulator.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buffer: Vec<u8>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte; returns the completed frame payload on the terminator.
    ///
    /// Payload bytes are ASCII alphanumerics and spaces. Anything else is
    /// line noise and is discarded without disturbing the buffer.
    pub fn push(&mut self, byte: u8) -> Option<Vec<u8>> {
        if byte == TERMINATOR {
            return Some(std::mem::take(&mut self.buffer));
        }
        if byte == b' ' || byte.is_ascii_alphanumeric() {
            self.buffer.push(byte);
        } else {
            tracing::trace!("discarding noise byte {byte:#04X}");
        }
        None
    }
}
