use crate::FourCC;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("truncated header at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedHeader {
        offset: u64,
        needed: u64,
        available: u64,
    },

    #[error("invalid size for box {kind} at offset {offset}: size={size} available={available}")]
    InvalidBoxSize {
        kind: FourCC,
        offset: u64,
        size: u64,
        available: u64,
    },

    #[error("unexpected box: expected={expected} found={found}")]
    UnexpectedBox { expected: FourCC, found: FourCC },

    #[error("terminal box not found: {0}")]
    UnresolvedExtent(FourCC),

    #[error("carve error: {0}")]
    Carve(#[source] std::io::Error),

    #[error("commit error: {0}")]
    Commit(#[source] std::io::Error),

    #[error("invalid fourcc: {0:?}")]
    InvalidFourCC(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The box structure itself is broken; retrying won't help.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            Error::TruncatedHeader { .. } | Error::InvalidBoxSize { .. } | Error::UnexpectedBox { .. }
        )
    }

    /// Reading, writing or renaming failed; the whole unit may be retried.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Carve(_) | Error::Commit(_) | Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
