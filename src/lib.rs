//! Byte-oriented Huffman compression.
//!
//! [`encode`] turns a byte buffer into a packed payload plus a serialized code
//! table; [`decode`] reverses it. The payload is one padding byte followed by
//! the code bits packed MSB first. See [`table_codec`] for the table formats.

pub mod bits;
pub mod code_table;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod table_codec;
pub mod tree;

pub use code_table::{Code, CodeTable};
pub use config::{Config, TableFormat};
pub use decoder::{decode, decode_from_readers, decode_with, Decoder};
pub use encoder::{encode, encode_with, Encoded, Encoder};
pub use error::{Ambiguity, HuffmanError, Result};
pub use frequency::FrequencyTable;
