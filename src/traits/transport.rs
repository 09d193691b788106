use crate::message::ClientMessage;
use crate::transport::TransportError;

/// Outbound message channel to the remote peer.
/// Sends are fire-and-forget; no acknowledgment is awaited.
pub trait MessageSink {
    fn send(&mut self, message: &ClientMessage) -> Result<(), TransportError>;
}

/// Collects messages in memory
impl MessageSink for Vec<ClientMessage> {
    fn send(&mut self, message: &ClientMessage) -> Result<(), TransportError> {
        self.push(message.clone());
        Ok(())
    }
}

impl<T: MessageSink + ?Sized> MessageSink for &mut T {
    fn send(&mut self, message: &ClientMessage) -> Result<(), TransportError> {
        (**self).send(message)
    }
}

impl<T: MessageSink + ?Sized> MessageSink for Box<T> {
    fn send(&mut self, message: &ClientMessage) -> Result<(), TransportError> {
        (**self).send(message)
    }
}
