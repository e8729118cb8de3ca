//! Step data model shared by the registry, the builder and the capture core.

pub mod errors;
pub mod fields;
pub mod step;
pub mod variant;

pub use errors::StepError;
pub use fields::{StepFields, COMMON_FIELDS};
pub use step::*;
pub use stepcapture_core_types::StepId;
pub use variant::{
    Comparator, MouseButton, NavigationKind, SelectBy, StepVariant, TextInputMode, TouchKind,
};
