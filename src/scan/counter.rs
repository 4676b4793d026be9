// src/scan/counter.rs

use std::collections::BTreeMap;

use crate::scan::rules::IterationRules;
use crate::types::Value;

/// Pairs an [`IterationRules`] with the number of blocks observed so far.
#[derive(Debug, Clone)]
pub struct IterationCounter {
    rules: IterationRules,
    count: usize,
}

impl IterationCounter {
    pub fn new(rules: IterationRules) -> Self {
        Self { rules, count: 0 }
    }

    pub fn increase(&mut self) {
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn rules(&self) -> &IterationRules {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut IterationRules {
        &mut self.rules
    }

    pub fn into_rules(self) -> IterationRules {
        self.rules
    }

    /// Owned copy of the current block's values, tagged with its number.
    pub fn snapshot(&self) -> IterationSnapshot {
        IterationSnapshot {
            index: self.count,
            values: self.rules.values().clone(),
        }
    }
}

/// Values of one completed block.
///
/// `index` is 1-based: the first block seen in the output is iteration 1.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationSnapshot {
    pub index: usize,
    pub values: BTreeMap<String, Value>,
}

impl IterationSnapshot {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}
