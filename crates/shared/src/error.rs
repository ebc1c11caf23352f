#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} already exists")]
    Conflict(String),

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::Unknown(value.into())
    }
}
