//! Shared fakes for exercising the session against a scripted device.

use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::task::JoinHandle;

/// Drive the far end of a duplex pipe like a TV: read CR-terminated
/// commands, reply with whatever `handler` returns, and report every
/// command seen once the pipe closes.
pub(crate) fn spawn_device(
    mut stream: DuplexStream,
    mut handler: impl FnMut(&str) -> Option<Vec<u8>> + Send + 'static,
) -> JoinHandle<Vec<String>> {
    tokio::spawn(async move {
        let mut seen = Vec::new();
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match stream.read(&mut byte).await {
                Ok(0) | Err(_) => break,
                Ok(_) if byte[0] == b'\r' => {
                    let text = String::from_utf8(std::mem::take(&mut line)).unwrap();
                    let reply = handler(&text);
                    seen.push(text);
                    if let Some(reply) = reply {
                        if stream.write_all(&reply).await.is_err() {
                            break;
                        }
                    }
                }
                Ok(_) => line.push(byte[0]),
            }
        }
        seen
    })
}
