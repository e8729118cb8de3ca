//! Capture core
//!
//! [`CaptureMachine`] owns the recording/picking flags, registers document
//! listeners through a [`CaptureHost`], and hands produced steps and signals to an
//! [`Outbox`]. [`HighlightCoordinator`] computes the hover outline while picking.

pub mod errors;
pub mod events;
pub mod fields;
pub mod highlight;
pub mod host;
pub mod machine;
pub mod messages;
pub mod policy;
pub mod state;

pub use errors::OutboxError;
pub use events::{DomEvent, EventDisposition};
pub use highlight::{HighlightCoordinator, HighlightUpdate};
pub use host::{CaptureHost, CursorAffordance, HostCall, ListenerKind, RecordingHost};
pub use machine::CaptureMachine;
pub use messages::{InboundSignal, OutboundMessage, Outbox};
pub use policy::CapturePolicyView;
pub use state::{CaptureMode, CaptureState, PendingFieldEdit};
