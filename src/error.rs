use thiserror::Error;

/// Result type for LG TV operations
pub type Result<T> = std::result::Result<T, LgTvError>;

/// Errors that can occur when talking to an LG TV over the serial link
#[derive(Error, Debug)]
pub enum LgTvError {
    /// The serial port or network bridge could not be opened
    #[error("could not connect to LG TV: {0}")]
    Connect(String),

    /// A command was issued on a session that is not open
    #[error("not connected")]
    NotConnected,

    /// The channel failed while a command was in flight; the session has
    /// closed itself and a fresh connect is required
    #[error("connection lost")]
    ConnectionLost,

    /// A locally validated argument was out of range; nothing was written
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The command text was not representable as 7-bit ASCII
    #[error("command is not ASCII: {0}")]
    Encode(String),
}
