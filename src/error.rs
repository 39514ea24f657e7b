use thiserror::Error;

/// Everything that can go wrong in the renderer.
#[derive(Debug, Error)]
pub enum Error {
    /// A `Vec3` lane was addressed with something other than 0, 1 or 2.
    #[error("index {0} not in {{0,1,2}}")]
    IndexOutOfRange(usize),

    #[error("invalid render settings: {0}")]
    InvalidSettings(String),

    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
