//! Wire codec for LG's ASCII serial command protocol.
//!
//! Commands go out as `"{command1}{command2} {set_id:02X}( {data:02X})*\r"`
//! and the TV answers with `"{command2} {set_id:02X} {status}{data:02X}"`
//! followed by an `x` terminator. The terminator is stripped by the framing
//! layer before a payload reaches [`decode`]. This module is pure: no I/O,
//! no state.

use crate::error::{LgTvError, Result};

/// Maximum number of data bytes a command can carry.
pub const MAX_DATA: usize = 6;

/// A command addressed to the TV.
///
/// `data` slots are filled front to back. Encoding stops at the first
/// absent slot, so values after a gap are never put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub command1: char,
    pub command2: char,
    pub set_id: u8,
    pub data: [Option<u8>; MAX_DATA],
}

impl Command {
    /// Create a command carrying a single data byte.
    pub fn new(command1: char, command2: char, set_id: u8, data0: u8) -> Self {
        let mut data = [None; MAX_DATA];
        data[0] = Some(data0);
        Self {
            command1,
            command2,
            set_id,
            data,
        }
    }

    /// Create a command with explicit data slots.
    pub fn with_data(
        command1: char,
        command2: char,
        set_id: u8,
        data: [Option<u8>; MAX_DATA],
    ) -> Self {
        Self {
            command1,
            command2,
            set_id,
            data,
        }
    }

    /// Encode into the wire byte format.
    ///
    /// The set-id and every present data byte render as two uppercase hex
    /// digits, space separated, with a single CR terminating the command.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut text = format!("{}{} {:02X}", self.command1, self.command2, self.set_id);
        for value in self.data.iter() {
            match value {
                Some(value) => text.push_str(&format!(" {value:02X}")),
                None => break,
            }
        }
        text.push('\r');

        if !text.is_ascii() {
            return Err(LgTvError::Encode(text));
        }
        Ok(text.into_bytes())
    }
}

/// A decoded response frame.
///
/// Only `data0` is ever populated by [`decode`]; the remaining slots are
/// reserved for commands that define multi-byte replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub command2: char,
    pub set_id: u8,
    pub status_ok: bool,
    pub data0: u8,
    pub data1: Option<u8>,
    pub data2: Option<u8>,
    pub data3: Option<u8>,
    pub data4: Option<u8>,
    pub data5: Option<u8>,
}

/// Decode one frame payload (terminator already stripped).
///
/// Returns `None` when the payload does not match the expected shape.
/// Garbage frames are expected from this device, so a failed decode is a
/// diagnostic condition rather than an error.
pub fn decode(payload: &[u8]) -> Option<Response> {
    let response = parse_payload(payload);
    if response.is_none() {
        tracing::warn!(
            "could not parse response payload {:?}",
            String::from_utf8_lossy(payload)
        );
    }
    response
}

fn parse_payload(payload: &[u8]) -> Option<Response> {
    let text = std::str::from_utf8(payload).ok()?;
    if !text.is_ascii() {
        return None;
    }
    let bytes = text.as_bytes();
    if bytes.len() < 8 || bytes[1] != b' ' || bytes[4] != b' ' {
        return None;
    }

    let command2 = bytes[0] as char;
    let set_id = u8::from_str_radix(&text[2..4], 16).ok()?;
    let status_ok = &text[5..7] == "OK";

    // Only a single hex pair is ever extracted; no known command sends
    // more than one meaningful byte back.
    let data = &text[7..];
    if data.len() > 2 {
        return None;
    }
    let data0 = u8::from_str_radix(data, 16).ok()?;

    Some(Response {
        command2,
        set_id,
        status_ok,
        data0,
        data1: None,
        data2: None,
        data3: None,
        data4: None,
        data5: None,
    })
}
