use std::io::Write;

use thiserror::Error;

use crate::message::ClientMessage;
use crate::traits::MessageSink;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write message: {0}")]
    Io(#[from] std::io::Error),
    #[error("connection closed")]
    Closed,
}

/// Writes each message as one line of JSON
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    sent: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, sent: 0 }
    }

    /// Number of messages written so far
    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageSink for JsonLinesSink<W> {
    fn send(&mut self, message: &ClientMessage) -> Result<(), TransportError> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.sent += 1;
        Ok(())
    }
}
