use std::io;
use std::sync::mpsc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GcError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("bad file format: {0}")]
    BadFileFormat(&'static str),
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("invalid configuration: {0}")]
    Config(&'static str),
    #[error("GC distribution lookup failed: {0}")]
    Distribution(String),
    #[error("channel closed: {0}")]
    SendError(String),
    #[error("worker thread panicked")]
    WorkerPanicked,
    #[error("result for sequence {0} was never produced")]
    MissingRow(usize),
}
pub type Result<T> = std::result::Result<T, GcError>;

impl GcError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        GcError::Parse {
            line,
            message: message.into(),
        }
    }
}

impl<T> From<mpsc::SendError<T>> for GcError {
    fn from(error: mpsc::SendError<T>) -> Self {
        GcError::SendError(error.to_string())
    }
}
impl<T> From<crossbeam_channel::SendError<T>> for GcError {
    fn from(error: crossbeam_channel::SendError<T>) -> Self {
        GcError::SendError(error.to_string())
    }
}
