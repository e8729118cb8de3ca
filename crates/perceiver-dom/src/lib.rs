//! Document abstraction for the recorder core.
//!
//! - [`DocumentPort`]: what the core needs from a host document
//! - [`Selector`]: parser/matcher for the locator grammar
//! - [`InMemoryDocument`]: arena tree implementing the port, built from [`NodeSpec`]

pub mod document;
pub mod errors;
pub mod model;
pub mod ports;
pub mod selector;

pub use document::InMemoryDocument;
pub use errors::{DocumentError, SelectorError};
pub use model::NodeSpec;
pub use ports::DocumentPort;
pub use selector::{is_identifier, quote_attr_value, Selector};
pub use stepcapture_core_types::{ElementRef, Rect};
