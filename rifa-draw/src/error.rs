use thiserror::Error;

pub type Result<T> = std::result::Result<T, DrawError>;

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("Rifa core error: {0}")]
    Core(#[from] rifa_core::RifaError),

    #[error("Invalid draw state: {0}")]
    InvalidState(String),
}
