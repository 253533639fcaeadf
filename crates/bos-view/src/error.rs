use bos_api_types::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("wallet api: {0:#}")]
    Api(#[from] anyhow::Error),
    #[error("malformed notification: {0}")]
    Parse(#[from] ParseError),
    #[error("missing element {0}")]
    MissingTarget(String),
    #[error("no current account")]
    NoCurrentAccount,
    #[error("cannot send: {0}")]
    InvalidSend(&'static str),
    #[error("unknown {kind} mode `{value}`")]
    UnknownMode { kind: &'static str, value: String },
}

impl ViewError {
    pub fn unknown_mode(kind: &'static str, value: impl Into<String>) -> Self {
        ViewError::UnknownMode {
            kind,
            value: value.into(),
        }
    }
}

pub type ViewResult<T = ()> = Result<T, ViewError>;
