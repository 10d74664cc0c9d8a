use crate::bits;
use crate::code_table::{Code, CodeTable};
use crate::config::Config;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::table_codec;
use crate::tree;
use bitvec::prelude::*;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct Encoder {
    table: CodeTable,
}

impl Encoder {
    pub fn new(table: CodeTable) -> Self {
        Self { table }
    }

    /// Derives the code table from the symbol frequencies of `input`.
    /// Returns `None` for empty input, which has no tree.
    pub fn for_input(input: &[u8]) -> Option<Self> {
        let freq = FrequencyTable::of(input);
        log::trace!("byte frequency: {:?}", freq);

        tree::build(&freq).map(|root| Self::new(CodeTable::from_tree(&root)))
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn into_table(self) -> CodeTable {
        self.table
    }

    /// Concatenates the code of every input byte, in input order.
    pub fn encode(&self, input: &[u8]) -> Result<Code> {
        let mut out = Code::new();
        for &symbol in input {
            let code = self
                .table
                .get(symbol)
                .ok_or(HuffmanError::UnknownSymbol { symbol })?;
            out.extend_from_bitslice(code);
        }

        Ok(out)
    }
}

/// Output of a compression run: the packed payload and the serialized table
/// needed to decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub payload: Vec<u8>,
    pub table: Vec<u8>,
}

impl Encoded {
    /// Writes the table, then the payload.
    ///
    /// A failing table sink leaves the payload sink untouched. The two sinks
    /// are independent, so a payload failure after the table was written is
    /// not rolled back; callers needing all-or-nothing output should write to
    /// temporary files and rename them.
    pub fn write_to(&self, mut payload: impl Write, mut table: impl Write) -> Result<()> {
        table.write_all(&self.table)?;
        table.flush()?;
        payload.write_all(&self.payload)?;
        payload.flush()?;
        Ok(())
    }
}

pub fn encode(input: &[u8]) -> Result<Encoded> {
    encode_with(&Config::default(), input)
}

/// Compresses `input`. Empty input yields the payload `[0]` and an empty
/// table.
pub fn encode_with(config: &Config, input: &[u8]) -> Result<Encoded> {
    let (packed, table) = match Encoder::for_input(input) {
        Some(enc) => {
            let encoded = enc.encode(input)?;
            (bits::pack(&encoded), enc.into_table())
        }
        None => (bits::pack(BitSlice::empty()), CodeTable::default()),
    };

    log::debug!(
        "encoded {} bytes with {} symbols into {} bits (padding {})",
        input.len(),
        table.len(),
        packed.bit_len(),
        packed.padding
    );

    Ok(Encoded {
        payload: packed.into_payload(),
        table: table_codec::serialize(&table, config.table_format)?,
    })
}
