//! Stdio event loop: a reader thread feeds frames to the main thread, which
//! wakes early for session deadlines.

use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Instant;

use tracing::{debug, info, warn};

use cscribe_config::Config;

use crate::LSP_TARGET;
use crate::error::ServerError;
use crate::server::{Control, Server};
use crate::transport::{MessageReader, TransportError};

type Frame = Result<Vec<u8>, TransportError>;

/// Serves one client over `input` and `output` until it exits.
///
/// Frames are read on a dedicated thread; all analysis runs on the calling
/// thread.
///
/// # Errors
///
/// Returns [`ServerError`] when the transport fails, or when the client
/// exits or closes `input` without a prior `shutdown` request.
pub fn run<R, W>(config: Config, input: R, output: W) -> Result<(), ServerError>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let (sender, receiver) = mpsc::channel();
    thread::Builder::new()
        .name(String::from("cscribed-reader"))
        .spawn(move || read_frames(MessageReader::new(input), &sender))
        .map_err(ServerError::reader_spawn)?;
    info!(target: LSP_TARGET, version = env!("CARGO_PKG_VERSION"), "serving on stdio");
    let mut server = Server::new(config, output);
    serve(&mut server, &receiver)
}

fn read_frames<R: BufRead>(mut reader: MessageReader<R>, sender: &Sender<Frame>) {
    loop {
        let frame = reader.receive();
        let last = !matches!(frame, Ok(Some(_)));
        let forwarded = match frame {
            Ok(Some(payload)) => sender.send(Ok(payload)),
            Ok(None) => {
                debug!(target: LSP_TARGET, "input closed");
                Ok(())
            }
            Err(error) => sender.send(Err(error)),
        };
        if last || forwarded.is_err() {
            return;
        }
    }
}

fn serve<W: Write>(
    server: &mut Server<W>,
    receiver: &Receiver<Frame>,
) -> Result<(), ServerError> {
    loop {
        let received = match server.next_deadline() {
            Some(deadline) => {
                receiver.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            }
            None => receiver.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(frame) => {
                let payload = frame?;
                if server.handle_payload(&payload, Instant::now())? == Control::Exit {
                    info!(target: LSP_TARGET, "client exited");
                    return server.finish();
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                let outcome = server.finish();
                if outcome.is_err() {
                    warn!(target: LSP_TARGET, "input closed before shutdown");
                }
                return outcome;
            }
        }
        server.poll(Instant::now());
    }
}
