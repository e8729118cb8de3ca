use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error("unknown step variant '{0}'")]
    UnknownVariant(String),
    #[error("a determined step cannot be turned back into an undetermined one")]
    RevertToUndetermined,
}
