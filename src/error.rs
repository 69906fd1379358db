use bitstream::BitstreamError;
use hufflpuff::CapacityError;
use hufflpuff::Symbol;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    #[error("bitstream error: {0}")]
    Bitstream(#[from] BitstreamError),
    #[error("invalid alphabet size {0}, expected 2..=2^24 symbols")]
    InvalidAlphabet(u32),
    #[error("symbol {symbol} is outside the alphabet of {size} symbols")]
    SymbolOutOfRange { symbol: Symbol, size: u32 },
    #[error("stream ends inside a code at bit {position}")]
    TruncatedCode { position: usize },
    #[error("raw symbol {symbol} at bit {position} was already transmitted")]
    SymbolAlreadyKnown { symbol: Symbol, position: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
