use thiserror::Error;

/// Errors raised by event operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event not found with id: {0}")]
    NotFound(i64),
}
