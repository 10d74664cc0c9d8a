use crate::error::{Ambiguity, HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{Kind, Node};
use bitvec::prelude::*;
use std::collections::BTreeMap;

/// A single code: the path from the root to a leaf, `0` for left, `1` for right.
pub type Code = BitVec<u8, Msb0>;

/// Mapping from symbol to its code. Iterates in ascending symbol order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Collects the path of every leaf under `root`.
    ///
    /// A root that is itself a leaf gets the code `0`, otherwise the only
    /// symbol would encode to zero bits.
    pub fn from_tree(root: &Node) -> Self {
        fn traverse(node: &Node, path: &mut Code, codes: &mut BTreeMap<u8, Code>) {
            match node.kind() {
                Kind::Leaf(symbol) => {
                    codes.insert(*symbol, path.clone());
                }
                Kind::Internal(left, right) => {
                    path.push(false);
                    traverse(left, path, codes);
                    path.pop();

                    path.push(true);
                    traverse(right, path, codes);
                    path.pop();
                }
            }
        }

        let mut codes = BTreeMap::new();
        match root.kind() {
            Kind::Leaf(symbol) => {
                codes.insert(*symbol, bitvec![u8, Msb0; 0]);
            }
            Kind::Internal(..) => {
                let mut path = Code::new();
                traverse(root, &mut path, &mut codes);
            }
        }

        Self { codes }
    }

    /// Builds a table from arbitrary entries. No prefix checks happen here;
    /// see [`CodeTable::validate`].
    pub fn from_entries(entries: impl IntoIterator<Item = (u8, Code)>) -> Self {
        Self {
            codes: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(&symbol).map(|c| c.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c.as_bitslice()))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(|c| c.len()).max().unwrap_or(0)
    }

    /// Total number of bits needed to encode an input with these frequencies.
    pub fn encoded_bits(&self, freq: &FrequencyTable) -> usize {
        freq.iter()
            .map(|(s, count)| self.codes.get(&s).map_or(0, |c| c.len()) * count)
            .sum()
    }

    /// Checks that every code is non-empty, distinct, and not a prefix of
    /// another.
    pub fn validate(&self) -> Result<()> {
        let mut sorted: Vec<(&BitSlice<u8, Msb0>, u8)> =
            self.codes.iter().map(|(&s, c)| (c.as_bitslice(), s)).collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        if let Some((_, symbol)) = sorted.iter().find(|(c, _)| c.is_empty()) {
            return Err(HuffmanError::corrupt(
                0,
                format!("symbol {symbol:#04x} has an empty code"),
            ));
        }

        // in sorted order, a code that prefixes any other also prefixes its successor
        for pair in sorted.windows(2) {
            let (a, first) = pair[0];
            let (b, second) = pair[1];
            let kind = if a == b {
                Ambiguity::DuplicateCode
            } else if b.starts_with(a) {
                Ambiguity::PrefixCollision
            } else {
                continue;
            };

            return Err(HuffmanError::AmbiguousTable {
                kind,
                first,
                second,
            });
        }

        Ok(())
    }
}
