// src/error.rs
use legion::Entity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("entity {entity:?} has no {component} component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    #[error("failed to read level file: {0}")]
    LevelIo(#[from] std::io::Error),

    #[error("malformed level file: {0}")]
    LevelFormat(#[from] serde_json::Error),

    #[error("invalid level: {0}")]
    InvalidLevel(String),

    #[error("invalid rules config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
