use perceiver_dom::DocumentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario document is invalid: {0}")]
    Document(#[from] DocumentError),

    #[error("event #{index} refers to unknown node '{reference}'")]
    UnknownRef { index: usize, reference: String },
}
