//! Locator synthesis
//!
//! Given a document element, produce an ordered list of selector strings that
//! each resolve back to exactly that element:
//! - test-id attribute
//! - element id
//! - `name` + tag
//! - `aria-label` + tag
//! - stable class tokens + tag
//! - structural path from `body`, only when nothing above was accepted

pub mod errors;
pub mod strategies;
pub mod synthesizer;
pub mod types;

pub use errors::*;
pub use strategies::{is_stable_class, propose, proposals, structural_path};
pub use synthesizer::{validate, LocatorSynthesizer};
pub use types::*;
