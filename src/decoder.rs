use crate::bits::{self, Packed};
use crate::code_table::{Code, CodeTable};
use crate::config::Config;
use crate::error::{HuffmanError, Result};
use crate::table_codec;
use bitvec::prelude::*;
use std::collections::HashMap;
use std::io::Read;

#[derive(Debug, Clone)]
pub struct Decoder {
    decode_table: HashMap<Code, u8>,
    max_code_len: usize,
}

impl Decoder {
    /// Inverts `table` into a code to symbol lookup. Fails if the table is not
    /// prefix free.
    pub fn new(table: &CodeTable) -> Result<Self> {
        table.validate()?;

        Ok(Self {
            decode_table: table.iter().map(|(s, c)| (c.to_bitvec(), s)).collect(),
            max_code_len: table.max_code_len(),
        })
    }

    /// Emits a symbol as soon as the accumulated bits match a code.
    ///
    /// Bits left over at the end, or a candidate longer than any code, mean
    /// the payload was cut short or belongs to a different table.
    pub fn decode(&self, input: &BitSlice<u8, Msb0>) -> Result<Vec<u8>> {
        let mut out = Vec::new();

        let mut cursor = Code::new();
        for b in input.iter().by_vals() {
            cursor.push(b);
            if let Some(&sym) = self.decode_table.get(&cursor) {
                cursor.clear();
                out.push(sym);
            } else if cursor.len() >= self.max_code_len {
                return Err(HuffmanError::TruncatedOrMismatched {
                    residual_bits: cursor.len(),
                });
            }
        }

        if !cursor.is_empty() {
            return Err(HuffmanError::TruncatedOrMismatched {
                residual_bits: cursor.len(),
            });
        }

        Ok(out)
    }
}

pub fn decode(payload: &[u8], table: &[u8]) -> Result<Vec<u8>> {
    decode_with(&Config::default(), payload, table)
}

pub fn decode_with(config: &Config, payload: &[u8], table: &[u8]) -> Result<Vec<u8>> {
    let table = table_codec::deserialize(table, config.table_format)?;
    let decoder = Decoder::new(&table)?;

    let packed = Packed::from_payload(payload)?;
    let bits = bits::unpack(packed.padding, &packed.bytes)?;
    let out = decoder.decode(&bits)?;

    log::debug!(
        "decoded {} bits with {} symbols into {} bytes",
        bits.len(),
        table.len(),
        out.len()
    );

    Ok(out)
}

/// Reads the payload and table from their sources in full, then decodes.
pub fn decode_from_readers(
    config: &Config,
    mut payload: impl Read,
    mut table: impl Read,
) -> Result<Vec<u8>> {
    let mut payload_buf = Vec::new();
    payload.read_to_end(&mut payload_buf)?;
    let mut table_buf = Vec::new();
    table.read_to_end(&mut table_buf)?;

    decode_with(config, &payload_buf, &table_buf)
}
