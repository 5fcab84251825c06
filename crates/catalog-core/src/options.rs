use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Attribute, AttributeCatalog};
use crate::variants::Variant;

/// One option row: the chosen attribute (by name) and the subset of its
/// values to build variants for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSelection {
    /// Attribute name; empty while the row is unset.
    #[serde(default)]
    pub attribute_id: String,
    #[serde(default)]
    pub attribute_values: Vec<String>,
}

impl OptionSelection {
    pub fn new<N, I, V>(attribute: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            attribute_id: attribute.into(),
            attribute_values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.attribute_id.trim().is_empty()
    }
}

/// Resolves option rows against the catalog into the attributes the
/// generator runs on.
///
/// A row is skipped when it has no attribute, no values, names an attribute
/// the catalog does not know, or repeats an attribute an earlier row already
/// chose. Values come out in the catalog's order; values the catalog does not
/// list are dropped, and a row left with none is skipped.
#[must_use]
pub fn derive_active_attributes(
    catalog: &AttributeCatalog,
    selections: &[OptionSelection],
) -> Vec<Attribute> {
    let mut seen = HashSet::new();
    let mut active = Vec::new();

    for (index, selection) in selections.iter().enumerate() {
        if selection.is_unset() {
            tracing::debug!(index, "skipping option row without an attribute");
            continue;
        }
        if selection.attribute_values.is_empty() {
            tracing::debug!(
                index,
                attribute = %selection.attribute_id,
                "skipping option row without values"
            );
            continue;
        }
        let Some(entry) = catalog.find(&selection.attribute_id) else {
            tracing::debug!(
                index,
                attribute = %selection.attribute_id,
                "skipping option row for attribute missing from catalog"
            );
            continue;
        };
        if !seen.insert(entry.name.as_str()) {
            tracing::warn!(
                index,
                attribute = %entry.name,
                "attribute already chosen by an earlier option row; ignoring duplicate"
            );
            continue;
        }

        let values: Vec<String> = entry
            .values
            .iter()
            .filter(|v| selection.attribute_values.contains(v))
            .cloned()
            .collect();
        if values.is_empty() {
            tracing::debug!(
                index,
                attribute = %entry.name,
                "skipping option row whose values are not in the catalog"
            );
            continue;
        }

        active.push(Attribute {
            id: entry.id,
            name: entry.name.clone(),
            values,
        });
    }

    active
}

/// Rebuilds option rows from persisted variants, for the edit flow.
///
/// One row per attribute in first-seen order; values in first-seen order
/// without duplicates.
#[must_use]
pub fn options_from_variants(variants: &[Variant]) -> Vec<OptionSelection> {
    let mut rows: Vec<OptionSelection> = Vec::new();

    for variant in variants {
        for (name, value) in variant.attributes.iter() {
            let row = match rows.iter().position(|r| r.attribute_id == name) {
                Some(i) => &mut rows[i],
                None => {
                    rows.push(OptionSelection::new(name, Vec::<String>::new()));
                    let last = rows.len() - 1;
                    &mut rows[last]
                }
            };
            if !row.attribute_values.iter().any(|v| v == value) {
                row.attribute_values.push(value.to_owned());
            }
        }
    }

    rows
}
