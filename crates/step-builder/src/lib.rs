//! Step synthesis: command lookup, locator synthesis and a three-layer field
//! merge (structural defaults < command defaults < observed values).

pub mod builder;

pub use builder::{ElementTarget, StepBuilder, StepDefaults};
