use std::collections::HashMap;

/// Occurrence count of every byte present in an input.
///
/// Keys are exactly the bytes seen at least once, so an empty input gives an
/// empty table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<u8, usize>,
}

impl FrequencyTable {
    pub fn of(bytes: &[u8]) -> Self {
        let mut counts: HashMap<u8, usize> = HashMap::new();
        for &b in bytes {
            *counts.entry(b).or_default() += 1;
        }

        Self { counts }
    }

    pub fn get(&self, symbol: u8) -> Option<usize> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}

impl FromIterator<(u8, usize)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, usize)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().filter(|&(_, c)| c > 0).collect(),
        }
    }
}
