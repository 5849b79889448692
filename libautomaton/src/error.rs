#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type AutomatonResult<T> = Result<T, AutomatonError>;
