use std::sync::Arc;

use serde::{Deserialize, Serialize};
use step_model::Step;
use stepcapture_event_bus::{EventBus, InMemoryBus};

use crate::errors::OutboxError;
use crate::highlight::HighlightUpdate;

/// Signals from the external coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InboundSignal {
    SetRecording(bool),
    SetPicking(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum OutboundMessage {
    StepProduced(Step),
    SetPicking(bool),
    Highlight(HighlightUpdate),
}

impl OutboundMessage {
    pub fn as_step(&self) -> Option<&Step> {
        match self {
            OutboundMessage::StepProduced(step) => Some(step),
            _ => None,
        }
    }
}

/// Where the machine hands outbound messages.
pub trait Outbox {
    fn send(&mut self, message: OutboundMessage) -> Result<(), OutboxError>;
}

impl Outbox for Vec<OutboundMessage> {
    fn send(&mut self, message: OutboundMessage) -> Result<(), OutboxError> {
        self.push(message);
        Ok(())
    }
}

impl Outbox for Arc<InMemoryBus<OutboundMessage>> {
    fn send(&mut self, message: OutboundMessage) -> Result<(), OutboxError> {
        self.publish(message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepcapture_event_bus::drain;

    #[test]
    fn bus_outbox_publishes_to_subscribers() {
        let mut bus = InMemoryBus::<OutboundMessage>::new(8);
        let mut rx = bus.subscribe();
        bus.send(OutboundMessage::SetPicking(false)).unwrap();
        assert_eq!(drain(&mut rx), vec![OutboundMessage::SetPicking(false)]);
    }

    #[test]
    fn bus_outbox_without_subscribers_errors() {
        let mut bus = InMemoryBus::<OutboundMessage>::new(8);
        assert!(matches!(
            bus.send(OutboundMessage::Highlight(HighlightUpdate::Hide)),
            Err(OutboxError::Bus(_))
        ));
    }

    #[test]
    fn signals_deserialize_from_snake_case() {
        let signal: InboundSignal = serde_json::from_str(r#"{"set_picking":true}"#).unwrap();
        assert_eq!(signal, InboundSignal::SetPicking(true));
    }
}
