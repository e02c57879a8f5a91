use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("invalid similarity threshold: {0}. threshold must be in [0, 1]")]
    InvalidThreshold(f64),
}
