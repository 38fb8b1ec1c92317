use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("No LLM provider configured (set GEMINI_API_KEY)")]
    NoProvider,
}

pub type Result<T> = std::result::Result<T, VoxError>;
