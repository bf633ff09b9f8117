use thiserror::Error as ThisError;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Failures raised by [`StoreRegistry`](crate::StoreRegistry) operations.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum StoreError {
    #[error("Store name can not be empty")]
    InvalidName,

    #[error("Store {0} already exist")]
    AlreadyExists(String),

    #[error("Store name does not exist")]
    NotFound(String),
}

/// Failures raised while parsing a batch command line.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum CommandError {
    #[error("Invalid command")]
    UnknownCommand,

    #[error("Invalid number of arguments")]
    ArgumentCount,

    #[error("Invalid command(should be like: {usage})")]
    MissingKeyword { usage: &'static str },
}
