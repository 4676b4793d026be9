#![allow(dead_code)]

use scriptrun::scan::IterationRules;
use scriptrun::types::ValueKind;

/// Builder for `IterationRules` to simplify test setup.
pub struct RulesBuilder {
    marker: String,
    rules: Vec<(String, String, ValueKind)>,
}

impl RulesBuilder {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.to_string(),
            rules: Vec::new(),
        }
    }

    pub fn float(mut self, key: &str, template: &str) -> Self {
        self.rules
            .push((key.to_string(), template.to_string(), ValueKind::Float));
        self
    }

    pub fn int(mut self, key: &str, template: &str) -> Self {
        self.rules
            .push((key.to_string(), template.to_string(), ValueKind::Int));
        self
    }

    pub fn text(mut self, key: &str, template: &str) -> Self {
        self.rules
            .push((key.to_string(), template.to_string(), ValueKind::None));
        self
    }

    pub fn build(self) -> IterationRules {
        let mut rules =
            IterationRules::new(&self.marker).expect("Failed to build marker from builder");
        for (key, template, kind) in self.rules {
            rules
                .register(key, &template, kind)
                .expect("Failed to register rule from builder");
        }
        rules
    }
}
