//! Cartesian-product generation over selected attribute values.
//!
//! [`generate_combinations`] takes the active attributes (name plus the
//! values chosen for it) and produces one [`Combination`] per element of the
//! product, in nested-loop order: the first attribute varies slowest and the
//! last varies fastest.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::Attribute;
use crate::variants::VariantKey;

/// One assignment of a single value per attribute, kept in the order the
/// attributes were supplied.
///
/// Serializes as a JSON/YAML map (`{"Color": "Red", "Size": "S"}`) with the
/// insertion order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Combination {
    entries: Vec<(String, String)>,
}

impl Combination {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing an existing entry in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Order-independent identity of this combination.
    #[must_use]
    pub fn key(&self) -> VariantKey {
        VariantKey::from_pairs(self.iter())
    }

    /// Human-readable label, e.g. `Color: Red, Size: S`.
    #[must_use]
    pub fn label(&self) -> String {
        self.iter()
            .map(|(n, v)| format!("{n}: {v}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<N, V> FromIterator<(N, V)> for Combination
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut combination = Combination::new();
        for (n, v) in iter {
            combination.insert(n, v);
        }
        combination
    }
}

impl Serialize for Combination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct CombinationVisitor;

impl<'de> Visitor<'de> for CombinationVisitor {
    type Value = Combination;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of attribute name to value")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut combination = Combination::new();
        while let Some((name, value)) = access.next_entry::<String, String>()? {
            combination.insert(name, value);
        }
        Ok(combination)
    }
}

impl<'de> Deserialize<'de> for Combination {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CombinationVisitor)
    }
}

/// Generates every combination of one value per attribute.
///
/// - An empty `attributes` slice yields exactly one empty combination.
/// - Any attribute with no values makes the whole product empty; callers are
///   expected to filter those out first.
#[must_use]
pub fn generate_combinations(attributes: &[Attribute]) -> Vec<Combination> {
    let mut out = Vec::with_capacity(capacity_hint(attributes));
    extend_combinations(attributes, Combination::new(), &mut out);
    out
}

fn extend_combinations(rest: &[Attribute], current: Combination, out: &mut Vec<Combination>) {
    let Some((attribute, tail)) = rest.split_first() else {
        out.push(current);
        return;
    };

    for value in &attribute.values {
        extend_combinations(
            tail,
            current.clone().with(attribute.name.as_str(), value.as_str()),
            out,
        );
    }
}

/// Size of the product `generate_combinations` would return, saturating at
/// `usize::MAX`.
#[must_use]
pub fn combination_count(attributes: &[Attribute]) -> usize {
    attributes
        .iter()
        .fold(1usize, |acc, a| acc.saturating_mul(a.values.len()))
}

/// Upper bound on up-front allocation; larger products grow as they go.
const MAX_PREALLOCATED: usize = 1 << 16;

fn capacity_hint(attributes: &[Attribute]) -> usize {
    combination_count(attributes).min(MAX_PREALLOCATED)
}
