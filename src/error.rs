use derive_more::{Display, From};

pub type Result<T> = core::result::Result<T, QuiverError>;

#[derive(Debug, Display, From)]
#[display("{self:?}")]
pub enum QuiverError {
    ZeroResolution,
    MismatchedLengths,
}

impl std::error::Error for QuiverError {}
