use crate::config::ConfigError;
use crate::state::StateError;
use thiserror::Error;

pub type ToggleResult<T> = std::result::Result<T, ToggleError>;

#[derive(Debug, Error)]
pub enum ToggleError {
    #[error("unknown theme mode: {0:?} (expected \"light\" or \"dark\")")]
    UnknownMode(String),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
