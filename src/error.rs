use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid board size: {width}x{height} (cell size {cell_size})")]
    InvalidBoard {
        width: i32,
        height: i32,
        cell_size: i32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
