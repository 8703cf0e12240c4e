use thiserror::Error;

#[derive(Error, Debug)]
pub enum DugoutError {
    #[error("Game is already over: {0}")]
    GameOver(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, DugoutError>;
