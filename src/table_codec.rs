//! Reading and writing code tables.
//!
//! The text form is line oriented, `<token> <code>\n` per symbol, and is
//! handled as raw bytes. Tokens:
//!
//! | byte              | token    |
//! |-------------------|----------|
//! | `0x0a`            | `\n`     |
//! | `0x0d`            | `\r`     |
//! | `0x09`            | `\t`     |
//! | `0x5c`            | `\\`     |
//! | `0x20`            | `space`  |
//! | `0x21..=0x7e`     | the byte |
//! | anything else     | `\xHH`   |
//!
//! Any single raw byte is also accepted when reading, so tables that only
//! escape newline and space still load.
//!
//! The binary form is MessagePack, each code stored as its bit length and
//! its packed bytes.

use crate::code_table::{Code, CodeTable};
use crate::config::TableFormat;
use crate::error::{HuffmanError, Result};
use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub fn serialize(table: &CodeTable, format: TableFormat) -> Result<Vec<u8>> {
    match format {
        TableFormat::Text => Ok(to_text(table)),
        TableFormat::Binary => to_binary(table),
    }
}

pub fn deserialize(data: &[u8], format: TableFormat) -> Result<CodeTable> {
    match format {
        TableFormat::Text => from_text(data),
        TableFormat::Binary => from_binary(data),
    }
}

pub fn to_text(table: &CodeTable) -> Vec<u8> {
    let mut out = Vec::new();
    for (symbol, code) in table.iter() {
        write_token(symbol, &mut out);
        out.push(b' ');
        out.extend(code.iter().by_vals().map(|b| if b { b'1' } else { b'0' }));
        out.push(b'\n');
    }

    out
}

pub fn from_text(text: &[u8]) -> Result<CodeTable> {
    let mut codes = BTreeMap::new();

    let mut lines: Vec<&[u8]> = text.split(|&b| b == b'\n').collect();
    if lines.last().map_or(false, |l| l.is_empty()) {
        lines.pop();
    }

    for (i, line) in lines.into_iter().enumerate() {
        let lineno = i + 1;
        let sep = line
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| HuffmanError::corrupt(lineno, "missing separator"))?;

        let symbol = parse_token(&line[..sep], lineno)?;
        let code = parse_code(&line[sep + 1..], lineno)?;

        if codes.insert(symbol, code).is_some() {
            return Err(HuffmanError::corrupt(
                lineno,
                format!("symbol {symbol:#04x} listed twice"),
            ));
        }
    }

    Ok(CodeTable::from_entries(codes))
}

fn write_token(symbol: u8, out: &mut Vec<u8>) {
    match symbol {
        b'\n' => out.extend_from_slice(br"\n"),
        b'\r' => out.extend_from_slice(br"\r"),
        b'\t' => out.extend_from_slice(br"\t"),
        b'\\' => out.extend_from_slice(br"\\"),
        b' ' => out.extend_from_slice(b"space"),
        0x21..=0x7e => out.push(symbol),
        _ => out.extend_from_slice(format!("\\x{symbol:02x}").as_bytes()),
    }
}

fn parse_token(token: &[u8], line: usize) -> Result<u8> {
    match token {
        [] => Err(HuffmanError::corrupt(line, "empty symbol token")),
        [b] => Ok(*b),
        br"\n" => Ok(b'\n'),
        br"\r" => Ok(b'\r'),
        br"\t" => Ok(b'\t'),
        br"\\" => Ok(b'\\'),
        b"space" => Ok(b' '),
        [b'\\', b'x', hi, lo] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
            Ok((hex_value(*hi) << 4) | hex_value(*lo))
        }
        _ => Err(HuffmanError::corrupt(
            line,
            format!(
                "unrecognized symbol token {:?}",
                String::from_utf8_lossy(token)
            ),
        )),
    }
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

fn parse_code(text: &[u8], line: usize) -> Result<Code> {
    if text.is_empty() {
        return Err(HuffmanError::corrupt(line, "empty code"));
    }

    text.iter()
        .map(|&c| match c {
            b'0' => Ok(false),
            b'1' => Ok(true),
            _ => Err(HuffmanError::corrupt(
                line,
                format!("invalid code character {:?}", c as char),
            )),
        })
        .collect()
}

#[derive(Serialize, Deserialize)]
struct SerializableCodeTable {
    entries: Vec<(u8, (usize, Box<[u8]>))>,
}

impl<'a> From<&'a CodeTable> for SerializableCodeTable {
    fn from(table: &'a CodeTable) -> Self {
        Self {
            entries: table
                .iter()
                .map(|(s, code)| {
                    // a code travels as its bit length and its packed bytes
                    let len = code.len();
                    let mut bv = code.to_bitvec();
                    bv.set_uninitialized(false);

                    (s, (len, bv.into_vec().into_boxed_slice()))
                })
                .collect(),
        }
    }
}

impl SerializableCodeTable {
    fn into_table(self) -> Result<CodeTable> {
        let mut codes = BTreeMap::new();
        for (i, (s, (len, bytes))) in self.entries.into_iter().enumerate() {
            let entry = i + 1;
            if len == 0 || len > bytes.len() * 8 {
                return Err(HuffmanError::corrupt(
                    entry,
                    format!("code length {len} does not fit {} bytes", bytes.len()),
                ));
            }

            let mut bv = BitVec::<u8, Msb0>::from_vec(bytes.into_vec());
            bv.truncate(len);

            if codes.insert(s, bv).is_some() {
                return Err(HuffmanError::corrupt(
                    entry,
                    format!("symbol {s:#04x} listed twice"),
                ));
            }
        }

        Ok(CodeTable::from_entries(codes))
    }
}

pub fn to_binary(table: &CodeTable) -> Result<Vec<u8>> {
    rmp_serde::to_vec(&SerializableCodeTable::from(table))
        .map_err(|e| HuffmanError::TableEncoding(e.to_string()))
}

/// Reads a MessagePack table. Container errors report line 0; entry errors
/// report the 1-based entry index.
pub fn from_binary(data: &[u8]) -> Result<CodeTable> {
    let raw: SerializableCodeTable =
        rmp_serde::from_slice(data).map_err(|e| HuffmanError::corrupt(0, e.to_string()))?;

    raw.into_table()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use crate::tree;
    use quickcheck_macros::quickcheck;

    fn code(s: &str) -> Code {
        s.chars().map(|c| c == '1').collect()
    }

    fn table_for(input: &[u8]) -> CodeTable {
        CodeTable::from_tree(&tree::build(&FrequencyTable::of(input)).unwrap())
    }

    #[test]
    fn text_layout() {
        let t = CodeTable::from_entries([
            (b'\n', code("00")),
            (b' ', code("01")),
            (b'a', code("10")),
            (b'\\', code("110")),
            (0xff, code("111")),
        ]);

        let text = to_text(&t);
        assert_eq!(
            text,
            b"\\n 00\nspace 01\n\\\\ 110\na 10\n\\xff 111\n".to_vec()
        );
        assert_eq!(from_text(&text).unwrap(), t);
    }

    #[test]
    fn reads_minimal_escapes() {
        // only newline and space escaped, backslash and a high byte raw
        let text = b"\\n 00\nspace 01\n\\ 10\n\xe9 11".to_vec();
        let t = from_text(&text).unwrap();

        assert_eq!(t.get(b'\n'), Some(code("00").as_bitslice()));
        assert_eq!(t.get(b' '), Some(code("01").as_bitslice()));
        assert_eq!(t.get(b'\\'), Some(code("10").as_bitslice()));
        assert_eq!(t.get(0xe9), Some(code("11").as_bitslice()));
    }

    #[test]
    fn s_is_not_space() {
        let text = b"s 0\nspace 1\n";
        let t = from_text(text).unwrap();
        assert_eq!(t.get(b's'), Some(code("0").as_bitslice()));
        assert_eq!(t.get(b' '), Some(code("1").as_bitslice()));
    }

    #[test]
    fn empty_text_is_empty_table() {
        assert!(from_text(b"").unwrap().is_empty());
        assert!(to_text(&CodeTable::default()).is_empty());
    }

    #[test]
    fn corrupt_lines() {
        let cases: &[(&[u8], usize)] = &[
            (b"a0\n", 1),
            (b"a 0\nb\n", 2),
            (b"a 0\n\nb 1\n", 2),
            (b" 0\n", 1),
            (b"foo 0\n", 1),
            (b"\\xzz 0\n", 1),
            (b"a \n", 1),
            (b"a 012\n", 1),
            (b"a 0\na 1\n", 2),
        ];

        for &(text, expected) in cases {
            match from_text(text) {
                Err(HuffmanError::CorruptTable { line, .. }) => assert_eq!(line, expected),
                other => panic!("{:?} gave {:?}", String::from_utf8_lossy(text), other),
            }
        }
    }

    #[test]
    fn binary_round_trip() {
        let t = table_for(b"Hello my name is Sam!");
        let data = to_binary(&t).unwrap();
        assert_eq!(from_binary(&data).unwrap(), t);
    }

    #[test]
    fn binary_rejects_garbage() {
        assert!(matches!(
            from_binary(&[0xc1, 0x00]),
            Err(HuffmanError::CorruptTable { line: 0, .. })
        ));

        let bad = SerializableCodeTable {
            entries: vec![(b'a', (9, vec![0xff].into_boxed_slice()))],
        };
        let data = rmp_serde::to_vec(&bad).unwrap();
        assert!(matches!(
            from_binary(&data),
            Err(HuffmanError::CorruptTable { line: 1, .. })
        ));
    }

    #[quickcheck]
    fn text_round_trip(bytes: Vec<u8>) -> bool {
        if bytes.is_empty() {
            return true;
        }
        let t = table_for(&bytes);
        from_text(&to_text(&t)).map_or(false, |back| back == t)
    }

    #[quickcheck]
    fn binary_round_trip_any(bytes: Vec<u8>) -> bool {
        if bytes.is_empty() {
            return true;
        }
        let t = table_for(&bytes);
        to_binary(&t)
            .and_then(|data| from_binary(&data))
            .map_or(false, |back| back == t)
    }
}
