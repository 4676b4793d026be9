// src/scan/line.rs

use std::fmt;

use regex::Regex;
use tracing::debug;

/// Placeholder inside a rule template that is replaced by a numeric
/// sub-pattern, e.g. `"residual = {}"`.
pub const PLACEHOLDER: &str = "{}";

/// Name of the group wrapping the first placeholder of a filled template.
pub const VALUE_GROUP: &str = "value";

/// Optional sign followed by either a decimal with a fractional part or a bare
/// integer.
pub const FLOAT_PATTERN: &str = r"[-+]?(?:[0-9]*\.[0-9]+|[0-9]+)";

pub const INT_PATTERN: &str = r"[-+]?[0-9]+";

/// Used for untyped rules: any run of non-whitespace.
pub const TOKEN_PATTERN: &str = r"\S+";

/// Substitute `sub` at the placeholder positions of `template`.
///
/// The first placeholder becomes the named group [`VALUE_GROUP`], so groups
/// the template declares itself never shadow the extracted value. Further
/// placeholders are filled with a non-capturing copy.
pub fn fill_template(template: &str, sub: &str) -> String {
    match template.split_once(PLACEHOLDER) {
        Some((head, tail)) => format!(
            "{head}(?P<{VALUE_GROUP}>{sub}){}",
            tail.replace(PLACEHOLDER, &format!("(?:{sub})"))
        ),
        None => template.to_string(),
    }
}

/// One line of console output from a program.
///
/// Immutable once created. Raw patterns follow "find all" semantics: when
/// the pattern has a capture group, the first group is reported instead of
/// the whole match. Filled templates report their [`VALUE_GROUP`] capture, so
/// `"x = {}"` yields just the number.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    text: String,
}

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// All non-overlapping matches of `pattern`, in order.
    pub fn find_all<'a>(&'a self, pattern: &Regex) -> Vec<&'a str> {
        let has_group = pattern.captures_len() > 1;
        pattern
            .captures_iter(&self.text)
            .map(|caps| {
                let m = if has_group { caps.get(1) } else { caps.get(0) };
                m.map_or("", |m| m.as_str())
            })
            .collect()
    }

    /// First match of `pattern`, or `None`.
    pub fn find_first<'a>(&'a self, pattern: &Regex) -> Option<&'a str> {
        self.find_all(pattern).into_iter().next()
    }

    /// First match of a filled template: the [`VALUE_GROUP`] capture when the
    /// pattern has one, otherwise the same as [`Line::find_first`].
    pub fn find_value<'a>(&'a self, pattern: &Regex) -> Option<&'a str> {
        let has_value_group = pattern.capture_names().any(|n| n == Some(VALUE_GROUP));
        if !has_value_group {
            return self.find_first(pattern);
        }
        pattern
            .captures(&self.text)
            .and_then(|caps| caps.name(VALUE_GROUP))
            .map(|m| m.as_str())
    }

    /// Locate a real number placed where `template` has `{}`.
    ///
    /// A template that does not compile is reported as "no match".
    pub fn find_float<'a>(&'a self, template: &str) -> Option<&'a str> {
        self.find_filled(template, FLOAT_PATTERN)
    }

    /// Integer counterpart of [`Line::find_float`].
    pub fn find_int<'a>(&'a self, template: &str) -> Option<&'a str> {
        self.find_filled(template, INT_PATTERN)
    }

    fn find_filled<'a>(&'a self, template: &str, sub: &str) -> Option<&'a str> {
        let pattern = fill_template(template, sub);
        match Regex::new(&pattern) {
            Ok(re) => self.find_value(&re),
            Err(e) => {
                debug!(template = %template, error = %e, "template does not compile; no match");
                None
            }
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
