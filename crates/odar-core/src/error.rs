use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ViewerError {
    #[error("unknown view preset '{0}' (expected isometric, front, top or side)")]
    UnknownViewPreset(String),
    #[error("invalid viewer config: {0}")]
    InvalidConfig(&'static str),
}
