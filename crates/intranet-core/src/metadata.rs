// Client bootstrap metadata
//
// Served on the public metadata path before login. The login form builds its
// validation schema from `rules`: "text_short" for names, "text_short#_" for
// passwords.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::account::Credentials;
use crate::paths::API_PREFIX;

pub const RULE_TEXT_SHORT: &str = "text_short";
pub const RULE_TEXT_SHORT_SECRET: &str = "text_short#_";

/// Inclusive length bounds for a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LengthRule {
    pub min: usize,
    pub max: usize,
}

impl LengthRule {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Check a value's length in characters
    pub fn accepts(&self, value: &str) -> bool {
        let len = value.chars().count();
        len >= self.min && len <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub api_prefix: String,
    pub rules: BTreeMap<String, LengthRule>,
}

impl Default for Metadata {
    fn default() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(RULE_TEXT_SHORT.to_string(), LengthRule::new(1, 50));
        rules.insert(RULE_TEXT_SHORT_SECRET.to_string(), LengthRule::new(8, 50));
        Self {
            api_prefix: API_PREFIX.to_string(),
            rules,
        }
    }
}

impl Metadata {
    pub fn rule(&self, name: &str) -> Option<&LengthRule> {
        self.rules.get(name)
    }

    /// Check login input against the same rules the login form enforces
    ///
    /// A missing rule accepts anything.
    pub fn accepts_credentials(&self, credentials: &Credentials) -> bool {
        let within = |rule: &str, value: &str| self.rule(rule).map_or(true, |r| r.accepts(value));
        within(RULE_TEXT_SHORT, &credentials.name)
            && within(RULE_TEXT_SHORT_SECRET, &credentials.password)
    }
}
