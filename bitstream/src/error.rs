use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitstreamError {
    #[error("end mark not present, the stream is empty or corrupted")]
    MissingEndMark,
    #[error("unexpected end of stream: requested {requested} bits, {available} available")]
    UnexpectedEnd { requested: usize, available: usize },
}
