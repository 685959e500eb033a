use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Launch error: {0}")]
    Launch(String),

    #[error("Page error: {0}")]
    Page(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Close error: {0}")]
    Close(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
