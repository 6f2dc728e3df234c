use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Collection failed: {0}")]
    Collect(#[from] crate::collector::CollectorError),

    #[error("Publish failed: {0}")]
    Publish(#[from] crate::publisher::PublishError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] crate::publisher::PayloadError),
}

pub type CommandResult<T> = Result<T, CommandError>;
