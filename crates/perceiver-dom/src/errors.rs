use thiserror::Error;

/// Raised when a selector cannot be parsed or evaluated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    #[error("unexpected end of selector")]
    UnexpectedEnd,
    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),
    #[error("invalid identifier at offset {0}")]
    InvalidIdentifier(usize),
    #[error("invalid :nth-of-type argument '{0}'")]
    InvalidNth(String),
    #[error("unsupported pseudo-class ':{0}'")]
    UnsupportedPseudo(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("node reference '{0}' is used more than once")]
    DuplicateRef(String),
    #[error("unknown node {0}")]
    UnknownNode(String),
}
