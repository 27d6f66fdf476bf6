use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;
