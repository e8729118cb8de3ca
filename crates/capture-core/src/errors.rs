use stepcapture_event_bus::BusError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OutboxError {
    #[error("bus rejected message: {0}")]
    Bus(#[from] BusError),
}
