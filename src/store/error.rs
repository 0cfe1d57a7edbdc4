use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read/write progress file: {0}")]
    Io(#[from] std::io::Error),

    #[error("progress file is corrupt: {0}")]
    CorruptData(#[source] serde_json::Error),

    #[error("failed to serialize progress: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to access data directory")]
    NoDataDir,
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
