use thiserror::Error;

pub type Result<T> = std::result::Result<T, CasError>;

#[derive(Debug, Error)]
pub enum CasError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    #[error("division by zero in {0}")]
    DivisionByZero(String),
    #[error("no free variable in {0}")]
    NoVariable(String),
    #[error("configuration error: {0}")]
    Config(String),
}
