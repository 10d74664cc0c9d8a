use serde::{Deserialize, Serialize};

/// How the code table is written alongside the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableFormat {
    /// One `<token> <code>` line per symbol.
    #[default]
    Text,
    /// MessagePack with each code stored as a bit length plus packed bytes.
    Binary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub table_format: TableFormat,
}

impl Config {
    pub fn binary() -> Self {
        Self {
            table_format: TableFormat::Binary,
        }
    }
}
