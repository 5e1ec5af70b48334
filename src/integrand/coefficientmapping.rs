use std::collections::BTreeMap;
use std::fmt;

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer
};

/// Key of a polynomial coefficient.
///
/// Keys are ranked, not interpreted: the position of a key in the
/// descending order decides which power of x its coefficient multiplies.
/// Numeric keys sort before textual keys; text compares lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CoefficientKey {
    Numeric(i64),
    Text(String)
}

impl fmt::Display for CoefficientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoefficientKey::Numeric(number) => write!(f, "{}", number),
            CoefficientKey::Text(text) => write!(f, "{}", text)
        }
    }
}

impl From<&str> for CoefficientKey {
    fn from(text: &str) -> CoefficientKey {
        CoefficientKey::Text(text.to_owned())
    }
}

impl From<String> for CoefficientKey {
    fn from(text: String) -> CoefficientKey {
        CoefficientKey::Text(text)
    }
}

impl From<i64> for CoefficientKey {
    fn from(number: i64) -> CoefficientKey {
        CoefficientKey::Numeric(number)
    }
}

/// Unique-keyed coefficient set. Inserting an existing key overwrites it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoefficientMapping {
    map: BTreeMap<CoefficientKey, f64>
}

impl CoefficientMapping {
    pub fn new() -> CoefficientMapping {
        CoefficientMapping { map: BTreeMap::new() }
    }

    /// Returns the value that was replaced, if any.
    pub fn insert<K: Into<CoefficientKey>>(&mut self, key: K, coefficient: f64) -> Option<f64> {
        self.map.insert(key.into(), coefficient)
    }

    pub fn with<K: Into<CoefficientKey>>(mut self, key: K, coefficient: f64) -> CoefficientMapping {
        self.insert(key, coefficient);
        self
    }

    pub fn get(&self, key: &CoefficientKey) -> Option<f64> {
        self.map.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Entries in descending key order; the n-th entry multiplies x^n.
    pub fn iter_descending(&self) -> impl Iterator<Item = (&CoefficientKey, f64)> + '_ {
        self.map.iter().rev().map(|(key, coefficient)| (key, *coefficient))
    }

    pub fn ranked_coefficients(&self) -> Vec<f64> {
        self.iter_descending().map(|(_, coefficient)| coefficient).collect()
    }
}

impl<K: Into<CoefficientKey>> FromIterator<(K, f64)> for CoefficientMapping {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> CoefficientMapping {
        let mut mapping = CoefficientMapping::new();
        for (key, coefficient) in iter {
            mapping.insert(key, coefficient);
        }
        mapping
    }
}

impl Serialize for CoefficientMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.map.iter().map(|(key, coefficient)| (key.to_string(), coefficient)))
    }
}

// JSON object keys are always strings, so every deserialized key is textual.
// serde_json hands entries over in document order, which keeps the last
// duplicate.
impl<'de> Deserialize<'de> for CoefficientMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<CoefficientMapping, D::Error> {
        let entries: Vec<(String, f64)> = deserializer.deserialize_map(EntryVisitor)?;
        Ok(entries.into_iter().collect())
    }
}

struct EntryVisitor;

impl<'de> serde::de::Visitor<'de> for EntryVisitor {
    type Value = Vec<(String, f64)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an object of coefficient names to numbers")
    }

    fn visit_map<A: serde::de::MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::new();
        while let Some((key, coefficient)) = access.next_entry::<String, f64>()? {
            entries.push((key, coefficient));
        }
        Ok(entries)
    }
}
