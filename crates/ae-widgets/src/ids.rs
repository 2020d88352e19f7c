//! Id generation
//!
//! One monotonically increasing sequence per prefix, owned by an `Enhancer`.

use std::collections::HashMap;

/// Per-instance unique id generator
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    counters: HashMap<String, u32>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `count` consecutive numbers for `prefix`, returning the first
    pub fn reserve(&mut self, prefix: &str, count: u32) -> u32 {
        let next = self.counters.entry(prefix.to_string()).or_insert(1);
        let first = *next;
        *next += count;
        first
    }

    /// Next id for `prefix`
    pub fn next_id(&mut self, prefix: &str) -> String {
        let n = self.reserve(prefix, 1);
        format!("{prefix}{n}")
    }
}
