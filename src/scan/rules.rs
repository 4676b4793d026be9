// src/scan/rules.rs

use std::collections::BTreeMap;

use regex::Regex;
use tracing::{debug, trace};

use crate::errors::{Result, RunnerError};
use crate::scan::line::{FLOAT_PATTERN, INT_PATTERN, Line, TOKEN_PATTERN, fill_template};
use crate::types::{Value, ValueKind};

/// How to find one value in a line of output.
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    template: String,
    kind: ValueKind,
    regex: Regex,
}

impl ExtractionRule {
    /// Compile `template` with the sub-pattern matching `kind`.
    pub fn new(template: impl Into<String>, kind: ValueKind) -> Result<Self> {
        let template = template.into();
        let sub = match kind {
            ValueKind::Float => FLOAT_PATTERN,
            ValueKind::Int => INT_PATTERN,
            ValueKind::None => TOKEN_PATTERN,
        };
        let pattern = fill_template(&template, sub);
        let regex = Regex::new(&pattern).map_err(|source| RunnerError::InvalidPattern {
            pattern: template.clone(),
            source,
        })?;

        Ok(Self {
            template,
            kind,
            regex,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Typed value found in `line`, if any.
    ///
    /// A match that does not parse (e.g. an integer overflowing `i64`) counts
    /// as no match.
    pub fn extract(&self, line: &Line) -> Option<Value> {
        let raw = line.find_value(&self.regex)?;
        let value = match self.kind {
            ValueKind::Float => raw.parse::<f64>().ok().map(Value::Float),
            ValueKind::Int => raw.parse::<i64>().ok().map(Value::Integer),
            ValueKind::None => Some(Value::Text(raw.to_string())),
        };
        if value.is_none() {
            debug!(template = %self.template, raw = %raw, "matched text does not parse");
        }
        value
    }
}

/// Rules describing one repeating block ("iteration") of program output.
///
/// Holds:
/// - the marker pattern that starts a block
/// - one [`ExtractionRule`] per key
/// - the value last stored for each key in the current block
///
/// Values are mutated in place while a block is scanned; completed blocks are
/// handed out as [`IterationSnapshot`](crate::scan::IterationSnapshot)s.
#[derive(Debug, Clone)]
pub struct IterationRules {
    marker: Regex,
    rules: BTreeMap<String, ExtractionRule>,
    values: BTreeMap<String, Value>,
}

impl IterationRules {
    pub fn new(marker: &str) -> Result<Self> {
        let marker = Regex::new(marker).map_err(|source| RunnerError::InvalidPattern {
            pattern: marker.to_string(),
            source,
        })?;
        Ok(Self {
            marker,
            rules: BTreeMap::new(),
            values: BTreeMap::new(),
        })
    }

    pub fn marker(&self) -> &str {
        self.marker.as_str()
    }

    pub fn is_block_start(&self, line: &Line) -> bool {
        self.marker.is_match(line.text())
    }

    /// Add or replace the rule for `key`. Its stored value becomes unset.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        template: &str,
        kind: ValueKind,
    ) -> Result<()> {
        let key = key.into();
        let rule = ExtractionRule::new(template, kind)?;
        trace!(key = %key, template = %template, ?kind, "registering extraction rule");
        self.rules.insert(key.clone(), rule);
        self.values.insert(key, Value::Unset);
        Ok(())
    }

    pub fn rule(&self, key: &str) -> Option<&ExtractionRule> {
        self.rules.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn reset(&mut self) {
        for value in self.values.values_mut() {
            *value = Value::Unset;
        }
    }

    /// Run the rule for `key` against `line` without storing the result.
    pub fn extract(&self, key: &str, line: &Line) -> Result<Option<Value>> {
        let rule = self
            .rules
            .get(key)
            .ok_or_else(|| RunnerError::UnknownKey(key.to_string()))?;
        Ok(rule.extract(line))
    }

    pub fn store(&mut self, key: &str, value: Value) -> Result<()> {
        let slot = self
            .values
            .get_mut(key)
            .ok_or_else(|| RunnerError::UnknownKey(key.to_string()))?;
        *slot = value;
        Ok(())
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Store every still-unset value that `line` provides.
    ///
    /// Only the first matching line of a block sets a key. Returns how many
    /// keys were filled by this line.
    pub fn fill_from(&mut self, line: &Line) -> usize {
        let mut filled = 0;
        for (key, rule) in &self.rules {
            let Some(slot) = self.values.get_mut(key) else {
                continue;
            };
            if slot.is_set() {
                continue;
            }
            if let Some(value) = rule.extract(line) {
                trace!(key = %key, %value, "value found");
                *slot = value;
                filled += 1;
            }
        }
        filled
    }
}
