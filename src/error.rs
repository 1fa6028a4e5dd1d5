use thiserror::Error;

pub type Result<T> = std::result::Result<T, PieError>;

#[derive(Error, Debug)]
pub enum PieError {
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
    #[error("Git repository error: {0}")]
    Repo(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Cannot specify both a repository and a load file")]
    SourceConflict,
    #[error("Must specify either a repository (--repo) or a load file (--load)")]
    NoSource,
}

impl From<gix::discover::Error> for PieError {
    fn from(err: gix::discover::Error) -> Self {
        PieError::GitDiscover(Box::new(err))
    }
}
