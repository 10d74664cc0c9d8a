use std::io;
use thiserror::Error;

/// Why a code table was rejected as ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ambiguity {
    /// The same code is assigned to two different symbols.
    DuplicateCode,
    /// One code is a proper prefix of another.
    PrefixCollision,
}

#[derive(Error, Debug)]
pub enum HuffmanError {
    #[error("corrupt code table at line {line}: {reason}")]
    CorruptTable { line: usize, reason: String },

    #[error("ambiguous code table ({kind:?}) between symbols {first:#04x} and {second:#04x}")]
    AmbiguousTable {
        kind: Ambiguity,
        first: u8,
        second: u8,
    },

    #[error("payload is missing its padding byte")]
    MissingPaddingByte,

    #[error("padding count {padding} is out of range for a {available}-bit payload")]
    InvalidPadding { padding: u8, available: usize },

    #[error("payload is truncated or does not match the table: {residual_bits} unmatched bits")]
    TruncatedOrMismatched { residual_bits: usize },

    #[error("symbol {symbol:#04x} has no code in the table")]
    UnknownSymbol { symbol: u8 },

    #[error("code table encoding failed: {0}")]
    TableEncoding(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl HuffmanError {
    pub(crate) fn corrupt(line: usize, reason: impl Into<String>) -> Self {
        Self::CorruptTable {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
