//! Transport session for a single TV.
//!
//! A [`Connection`] owns the open byte channel and funnels every command
//! through one mutex, so the wire only ever sees well-formed,
//! non-interleaved request/response pairs. There is no background reader:
//! the protocol is strictly request/response, and bytes are only pulled
//! off the wire while a command is waiting for its reply.

use std::io;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tokio_serial::{SerialPort, SerialPortBuilderExt};

use crate::error::{LgTvError, Result};
use crate::framing::FrameBuffer;
use crate::protocol::{self, Command, Response};

/// How long to wait for a response before giving up on it.
///
/// Not every query is answered on every firmware, so running into this
/// deadline is a normal outcome and leaves the session open.
pub(crate) const RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Callback invoked at most once when the connection is lost unexpectedly.
///
/// It does not fire on an explicit [`Connection::close`]. Reconnecting is
/// the caller's policy; hand heavy work off to a task.
pub type DisconnectCallback = Box<dyn FnOnce() + Send>;

/// Options for opening the channel to a TV.
///
/// The wire format itself is fixed at 8 data bits, no parity, one stop
/// bit; the flow-control flags are passed through to the transport.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Device address for multi-TV serial lines, 0-99. Defaults to 0.
    pub set_id: u8,
    /// Baud rate. 9600 on every known model.
    pub baud_rate: u32,
    /// RTS/CTS hardware flow control.
    pub rtscts: bool,
    /// Assert the DTR line after opening the port.
    pub dsrdtr: bool,
    /// XON/XOFF software flow control.
    pub xonxoff: bool,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            set_id: 0,
            baud_rate: 9600,
            rtscts: false,
            dsrdtr: false,
            xonxoff: false,
        }
    }
}

trait ByteChannel: AsyncRead + AsyncWrite + Send + Unpin {}
impl<T: AsyncRead + AsyncWrite + Send + Unpin> ByteChannel for T {}

struct Inner {
    stream: BufReader<Box<dyn ByteChannel>>,
}

/// Serialized command channel to one TV.
///
/// The session is connected while the inner channel is present and closed
/// once it has been taken. The tokio mutex queues concurrent callers in
/// FIFO order, and its guard is released when a waiting caller is
/// cancelled, so an abandoned command never wedges the session.
pub struct Connection {
    inner: Mutex<Option<Inner>>,
    on_disconnect: StdMutex<Option<DisconnectCallback>>,
}

impl Connection {
    /// Open the byte channel to the TV.
    ///
    /// `url` is either a serial device path (`/dev/ttyUSB0`, `COM3`) or a
    /// `socket://host:port` pseudo-address for a TCP-to-serial bridge.
    /// No command is issued to validate the link; issue a facade query and
    /// check for a non-`None` result to establish liveness.
    pub async fn connect(url: &str, options: &ConnectOptions) -> Result<Self> {
        let stream = open_channel(url, options).await?;
        tracing::info!("connected to {}", url);
        Ok(Self {
            inner: Mutex::new(Some(Inner {
                stream: BufReader::new(stream),
            })),
            on_disconnect: StdMutex::new(None),
        })
    }

    #[cfg(test)]
    pub(crate) fn from_stream(
        stream: impl AsyncRead + AsyncWrite + Send + Unpin + 'static,
    ) -> Self {
        Self {
            inner: Mutex::new(Some(Inner {
                stream: BufReader::new(Box::new(stream)),
            })),
            on_disconnect: StdMutex::new(None),
        }
    }

    /// Register the disconnect callback, replacing any previous one.
    pub fn set_on_disconnect(&self, callback: DisconnectCallback) {
        *self.on_disconnect.lock().unwrap() = Some(callback);
    }

    /// Send one command and wait for its response.
    ///
    /// Returns `Ok(None)` when the TV does not answer within
    /// [`RESPONSE_TIMEOUT`] or answers with a frame that does not parse;
    /// the session stays open in both cases. Connection loss (EOF, an
    /// out-of-sync response, or an I/O failure) closes the session, fires
    /// the disconnect callback and surfaces as
    /// [`LgTvError::ConnectionLost`].
    pub async fn send_command(&self, command: &Command) -> Result<Option<Response>> {
        let frame = command.encode()?;

        let mut guard = self.inner.lock().await;
        let inner = guard.as_mut().ok_or(LgTvError::NotConnected)?;

        tracing::debug!("sending {:?}", String::from_utf8_lossy(&frame));
        match timeout(RESPONSE_TIMEOUT, exchange(inner, &frame, command.command2)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(error)) => {
                // The channel is no longer trustworthy; drop it and tell
                // the observer. Callers queued behind us find the session
                // closed and fail fast.
                guard.take();
                drop(guard);
                self.fire_on_disconnect();
                Err(error)
            }
            Err(_) => {
                tracing::debug!(
                    "no response to {:?} within {:?}",
                    command.command2,
                    RESPONSE_TIMEOUT
                );
                Ok(None)
            }
        }
    }

    /// Close the session.
    ///
    /// Never fires the disconnect callback; that is reserved for unplanned
    /// loss. Closing an already-closed session is a no-op.
    pub async fn close(&self) {
        self.on_disconnect.lock().unwrap().take();
        if let Some(mut inner) = self.inner.lock().await.take() {
            let _ = inner.stream.shutdown().await;
            tracing::info!("connection closed");
        }
    }

    fn fire_on_disconnect(&self) {
        if let Some(callback) = self.on_disconnect.lock().unwrap().take() {
            callback();
        }
    }
}

/// Write the command and read frames until one matches it.
async fn exchange(inner: &mut Inner, frame: &[u8], command2: char) -> Result<Option<Response>> {
    inner.stream.write_all(frame).await.map_err(channel_failed)?;
    inner.stream.flush().await.map_err(channel_failed)?;

    let mut frames = FrameBuffer::new();
    loop {
        let byte = match inner.stream.read_u8().await {
            Ok(byte) => byte,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                tracing::warn!("stream closed while waiting for a response");
                return Err(LgTvError::ConnectionLost);
            }
            Err(error) => {
                tracing::warn!("read failed: {}", error);
                return Err(LgTvError::ConnectionLost);
            }
        };

        let Some(payload) = frames.push(byte) else {
            continue;
        };
        let Some(response) = protocol::decode(&payload) else {
            // Garbage frames happen on this hardware; the caller just
            // learns nothing this round.
            return Ok(None);
        };
        if response.command2 != command2 {
            // A stale or duplicated response means the channel no longer
            // lines up with our requests, and this protocol has no marker
            // to resync on. Treat it as lost and start over with a fresh
            // connect.
            tracing::warn!(
                "response for {:?} while waiting for {:?}, channel out of sync",
                response.command2,
                command2
            );
            return Err(LgTvError::ConnectionLost);
        }
        return Ok(Some(response));
    }
}

fn channel_failed(error: io::Error) -> LgTvError {
    tracing::warn!("write failed: {}", error);
    LgTvError::ConnectionLost
}

async fn open_channel(url: &str, options: &ConnectOptions) -> Result<Box<dyn ByteChannel>> {
    if let Some(address) = url.strip_prefix("socket://") {
        let stream = TcpStream::connect(address)
            .await
            .map_err(|error| LgTvError::Connect(format!("could not reach {url}: {error}")))?;
        let _ = stream.set_nodelay(true);
        return Ok(Box::new(stream));
    }

    let flow_control = if options.rtscts {
        tokio_serial::FlowControl::Hardware
    } else if options.xonxoff {
        tokio_serial::FlowControl::Software
    } else {
        tokio_serial::FlowControl::None
    };

    let mut port = tokio_serial::new(url, options.baud_rate)
        .data_bits(tokio_serial::DataBits::Eight)
        .stop_bits(tokio_serial::StopBits::One)
        .parity(tokio_serial::Parity::None)
        .flow_control(flow_control)
        .open_native_async()
        .map_err(|error| {
            LgTvError::Connect(format!(
                "could not open serial port {url}, check the port settings: {error}"
            ))
        })?;

    if options.dsrdtr {
        if let Err(error) = port.write_data_terminal_ready(true) {
            tracing::warn!("could not assert DTR on {}: {}", url, error);
        }
    }

    Ok(Box::new(port))
}
