//! Packing of bit-strings into padded, MSB-first bytes and back.
//!
//! A payload is one padding byte (0..=7) followed by the packed bytes. The
//! padding counts the zero bits appended to the last byte.

use crate::error::{HuffmanError, Result};
use bitvec::prelude::*;

/// Bits packed into whole bytes, plus how many trailing zero bits were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Packed {
    pub padding: u8,
    pub bytes: Vec<u8>,
}

impl Packed {
    /// Lays out the payload: padding byte first, then the data bytes.
    pub fn into_payload(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.bytes.len() + 1);
        out.push(self.padding);
        out.extend(self.bytes);
        out
    }

    /// Splits a payload back into its padding byte and data bytes.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        let (&padding, bytes) = payload
            .split_first()
            .ok_or(HuffmanError::MissingPaddingByte)?;

        Ok(Self {
            padding,
            bytes: bytes.to_vec(),
        })
    }

    pub fn bit_len(&self) -> usize {
        (self.bytes.len() * 8).saturating_sub(self.padding as usize)
    }
}

/// Pads `bits` with zeros to a byte boundary and groups them MSB first.
pub fn pack(bits: &BitSlice<u8, Msb0>) -> Packed {
    let padding = (8 - bits.len() % 8) % 8;

    let mut bv = bits.to_bitvec();
    bv.resize(bits.len() + padding, false);

    Packed {
        padding: padding as u8,
        bytes: bv.into_vec(),
    }
}

/// Expands `bytes` MSB first and drops the trailing `padding` bits.
///
/// Fails if the padding is out of range. Dropped bits that are not zero were
/// never written by [`pack`], so the payload does not match what was packed.
pub fn unpack(padding: u8, bytes: &[u8]) -> Result<BitVec<u8, Msb0>> {
    let available = bytes.len() * 8;
    if padding > 7 || padding as usize > available {
        return Err(HuffmanError::InvalidPadding { padding, available });
    }

    let mut bv = BitVec::<u8, Msb0>::from_slice(bytes);
    let keep = available - padding as usize;
    if bv[keep..].any() {
        return Err(HuffmanError::TruncatedOrMismatched {
            residual_bits: padding as usize,
        });
    }
    bv.truncate(keep);

    Ok(bv)
}
