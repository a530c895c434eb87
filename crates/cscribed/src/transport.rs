//! Stdio transport with LSP header framing.
//!
//! Every message is prefixed with headers and a blank line:
//! ```text
//! Content-Length: <length>\r\n
//! \r\n
//! <payload>
//! ```

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Transport-layer errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The header block had no `Content-Length`.
    #[error("missing Content-Length header")]
    MissingContentLength,

    /// A header line could not be parsed.
    #[error("invalid header: {header}")]
    InvalidHeader {
        /// The offending header line.
        header: String,
    },
}

/// Reads LSP-framed messages.
#[derive(Debug)]
pub struct MessageReader<R> {
    reader: R,
}

impl<R: BufRead> MessageReader<R> {
    /// Wraps a buffered reader.
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Receives one message payload, blocking until it is complete.
    ///
    /// Returns `Ok(None)` when the input ends between messages.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::MissingContentLength`] or
    /// [`TransportError::InvalidHeader`] for malformed headers, and
    /// [`TransportError::Io`] when reading fails or the input ends inside a
    /// message.
    pub fn receive(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        let Some(content_length) = self.read_headers()? else {
            return Ok(None);
        };
        let mut content = vec![0u8; content_length];
        self.reader.read_exact(&mut content)?;
        Ok(Some(content))
    }

    fn read_headers(&mut self) -> Result<Option<usize>, TransportError> {
        let mut content_length = None;
        let mut started = false;

        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                if !started {
                    return Ok(None);
                }
                return Err(TransportError::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed while reading headers",
                )));
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            started = true;
            if let Some(length) = parse_content_length(trimmed)? {
                content_length = Some(length);
            }
            // Other headers, such as Content-Type, are ignored.
        }

        content_length
            .map(Some)
            .ok_or(TransportError::MissingContentLength)
    }
}

fn parse_content_length(header: &str) -> Result<Option<usize>, TransportError> {
    let invalid = || TransportError::InvalidHeader {
        header: header.to_owned(),
    };
    let (name, value) = header.split_once(':').ok_or_else(invalid)?;
    if !name.trim().eq_ignore_ascii_case("Content-Length") {
        return Ok(None);
    }
    value.trim().parse().map(Some).map_err(|_| invalid())
}

/// Writes LSP-framed messages.
#[derive(Debug)]
pub struct MessageWriter<W> {
    writer: W,
}

impl<W: Write> MessageWriter<W> {
    /// Wraps a writer.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Sends one payload and flushes.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Io`] if writing fails.
    pub fn send(&mut self, message: &[u8]) -> Result<(), TransportError> {
        let header = format!("Content-Length: {}\r\n\r\n", message.len());
        self.writer.write_all(header.as_bytes())?;
        self.writer.write_all(message)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Borrows the wrapped writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}
