use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Word-addressed memory as seen through the MAR/MBR latches.
pub trait Bus {
    fn read_u32(&mut self, addr: u32) -> u32;
    fn write_u32(&mut self, addr: u32, val: u32);
}

/// Sparse word memory. Unmapped addresses read as zero; nothing is ever evicted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseMemory {
    pub words: BTreeMap<u32, u32>,
}

impl SparseMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapped value at `addr`, without the read-as-zero fallback.
    pub fn get(&self, addr: u32) -> Option<u32> {
        self.words.get(&addr).copied()
    }

    /// Mapped words in ascending address order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.words.iter().map(|(&a, &v)| (a, v))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Bus for SparseMemory {
    fn read_u32(&mut self, addr: u32) -> u32 {
        self.get(addr).unwrap_or(0)
    }
    fn write_u32(&mut self, addr: u32, val: u32) {
        self.words.insert(addr, val);
    }
}
