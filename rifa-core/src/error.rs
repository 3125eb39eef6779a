use thiserror::Error;

pub type Result<T> = std::result::Result<T, RifaError>;

#[derive(Error, Debug)]
pub enum RifaError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Ticket number out of range: {0}")]
    InvalidTicket(u32),

    #[error("Selection is empty, at least one ticket is required")]
    EmptySelection,

    #[error("Ticket digit fields are incomplete")]
    IncompleteDigits,

    #[error("An availability check is already in flight")]
    ProbeBusy,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RifaError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
