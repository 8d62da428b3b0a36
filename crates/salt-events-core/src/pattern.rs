use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;

use crate::errors::CatalogError;

/// Named groups captured from a tag, e.g. `jid` or `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagCaptures(BTreeMap<String, String>);

impl TagCaptures {
    /// Captured text for `name`, if the group participated in the match.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true when nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Compiled tag pattern.
///
/// The expression is anchored on both ends when compiled, so a pattern only
/// matches a tag in its entirety, never a prefix or substring of it.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles a tag pattern.
    pub fn new(expr: &str) -> Result<Self, CatalogError> {
        let regex =
            Regex::new(&format!("^(?:{expr})$")).map_err(|source| CatalogError::InvalidPattern {
                pattern: expr.to_string(),
                source,
            })?;
        Ok(Self {
            source: expr.to_string(),
            regex,
        })
    }

    /// The expression as written, without anchors.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the whole tag matches.
    pub fn is_match(&self, tag: &str) -> bool {
        self.regex.is_match(tag)
    }

    /// Matches the whole tag and collects its named groups.
    pub fn captures(&self, tag: &str) -> Option<TagCaptures> {
        let caps = self.regex.captures(tag)?;
        let named = self
            .regex
            .capture_names()
            .flatten()
            .filter_map(|name| {
                caps.name(name)
                    .map(|m| (name.to_string(), m.as_str().to_string()))
            })
            .collect();
        Some(TagCaptures(named))
    }
}
