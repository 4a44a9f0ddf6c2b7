//! Rust library for controlling LG televisions over a serial link
//!
//! LG TVs expose an RS-232 service port speaking a simple ASCII
//! request/response protocol. This library implements that protocol and
//! provides a typed async API on top of it. It supports:
//!
//! - Power, volume and mute control
//! - Input source selection
//! - Picture settings (contrast, brightness, color, sharpness, color temperature)
//! - Sound settings (treble, bass, balance)
//! - Remote key injection and remote-control lock
//! - Energy saving and 3D playback modes
//! - A raw command escape hatch for anything not covered above
//! - Local serial devices and `socket://` TCP-to-serial bridges
//!
//! # Quick Start
//!
//! ```no_run
//! use lgtv_serial::{ConnectOptions, LgTv};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tv = LgTv::connect("/dev/ttyUSB0", ConnectOptions::default()).await?;
//!
//!     tv.set_power_on(true).await?;
//!     if let Some(volume) = tv.get_volume().await? {
//!         println!("volume is {volume}");
//!     }
//!
//!     tv.close().await;
//!     Ok(())
//! }
//! ```
//!
//! Getters return `Ok(None)` when the TV does not answer or reports a
//! failure status; treat that as "value unknown" rather than an error.
//! Not every firmware answers every query.
//!
//! # Architecture
//!
//! The library is organized into several layers:
//!
//! - **LgTv**: typed, validated operations (the public surface)
//! - **Connection**: serialized command dispatch, timeouts, loss detection
//! - **Framing**: reassembles the byte stream into response frames
//! - **Protocol**: the ASCII wire codec

mod connection;
mod error;
mod framing;
mod protocol;
#[cfg(test)]
mod testutil;
mod tv;
mod types;

// Public exports
pub use connection::{ConnectOptions, DisconnectCallback};
pub use error::{LgTvError, Result};
pub use protocol::Response;
pub use tv::{LgTv, StateChangedCallback};
pub use types::{Config3D, Encoding3D, EnergySaving, Input, Mode3D, RemoteKeyCode};
