//! Inline command literals and the memoizing parser.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde_yaml::Value;

/// A parsed command value: strings, nulls, and nested tuples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Null,
    Str(String),
    Seq(Vec<Literal>),
    /// Numbers, booleans, mappings. No command shape accepts these.
    Other,
}

impl Literal {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Literal]> {
        match self {
            Literal::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    /// Parse the comma-joined body of a command (without the brackets).
    pub fn parse(input: &str) -> Result<Literal, serde_yaml::Error> {
        let value: Value = serde_yaml::from_str(&format!("[{}]", input))?;
        Ok(Literal::from(value))
    }
}

impl From<Value> for Literal {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Literal::Null,
            Value::String(s) => Literal::Str(s),
            Value::Sequence(items) => Literal::Seq(items.into_iter().map(Literal::from).collect()),
            _ => Literal::Other,
        }
    }
}

/// Memoizes parsed literals by raw input for the lifetime of one run.
#[derive(Debug, Default)]
pub struct ParseCache {
    parsed: HashMap<String, Literal>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed literal for `input`. Failures are not cached.
    pub fn get_or_parse(&mut self, input: &str) -> Result<&Literal, serde_yaml::Error> {
        match self.parsed.entry(input.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(Literal::parse(input)?)),
        }
    }

    pub fn len(&self) -> usize {
        self.parsed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsed.is_empty()
    }

    pub fn clear(&mut self) {
        self.parsed.clear();
    }
}
