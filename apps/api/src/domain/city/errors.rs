use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflicting change: {0}")]
    Conflict(String),
    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}
