use std::collections::HashMap;

use log::warn;

use super::slider::SetValue;
use crate::message::{ClientMessage, GuiUpdateMessage};
use crate::traits::MessageSink;

/// Shared store of GUI component values.
///
/// Components never mutate values directly; they call [`SetValue::set_value`],
/// which records the value and queues an update for the remote peer.
#[derive(Debug, Default)]
pub struct GuiState {
    values: HashMap<String, f64>,
    pending: Vec<GuiUpdateMessage>,
}

impl GuiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, id: &str) -> Option<f64> {
        self.values.get(id).copied()
    }

    /// Set a value that came from the remote peer; nothing is queued
    pub fn insert(&mut self, id: impl Into<String>, value: f64) {
        self.values.insert(id.into(), value);
    }

    pub fn remove(&mut self, id: &str) -> Option<f64> {
        self.values.remove(id)
    }

    pub fn pending_updates(&self) -> &[GuiUpdateMessage] {
        &self.pending
    }

    /// Send queued updates, dropping any the sink rejects
    pub fn flush(&mut self, sink: &mut dyn MessageSink) -> usize {
        let mut sent = 0;
        for update in self.pending.drain(..) {
            let uuid = update.uuid.clone();
            match sink.send(&ClientMessage::GuiUpdateMessage(update)) {
                Ok(()) => sent += 1,
                Err(err) => warn!("Failed to send update for {uuid}: {err}"),
            }
        }
        sent
    }
}

impl SetValue for GuiState {
    fn set_value(&mut self, id: &str, value: f64) {
        if self.values.get(id) == Some(&value) {
            return;
        }
        self.values.insert(id.to_string(), value);

        // Only the latest value per component needs to reach the peer
        self.pending.retain(|update| update.uuid != id);
        self.pending.push(GuiUpdateMessage::value(id, value));
    }
}
