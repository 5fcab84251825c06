use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::combinations::Combination;

/// Order-independent identity of a variant: its attribute name/value pairs,
/// sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey(BTreeMap<String, String>);

impl VariantKey {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(n, v)| (n.to_owned(), v.to_owned()))
                .collect(),
        )
    }
}

/// An image attached to a product or variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum ImageRef {
    /// Already stored by the backend; the value is the server-side path.
    Existing(String),
    /// A local file to be sent with the next submission.
    Upload(PathBuf),
}

/// Per-variant fields the user edits. Everything is optional until filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

impl VariantDetails {
    /// `true` when nothing has been entered yet.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

/// One SKU-level combination of a variable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Backend ID; present only for variants that already exist server-side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub attributes: Combination,
    #[serde(flatten)]
    pub details: VariantDetails,
}

impl Variant {
    /// A freshly generated variant with no ID and no details.
    #[must_use]
    pub fn skeleton(attributes: Combination) -> Self {
        Self {
            id: None,
            attributes,
            details: VariantDetails::default(),
        }
    }

    #[must_use]
    pub fn key(&self) -> VariantKey {
        self.attributes.key()
    }

    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Builds the new variant list from freshly generated combinations, carrying
/// the ID and details of any previous variant with the same [`VariantKey`].
///
/// Output order is the order of `generated`. Previous variants whose
/// combination no longer appears are dropped. If `previous` holds more than
/// one variant for a key, the first one wins.
#[must_use]
pub fn merge_variants(previous: &[Variant], generated: Vec<Combination>) -> Vec<Variant> {
    let mut by_key: HashMap<VariantKey, &Variant> = HashMap::with_capacity(previous.len());
    for variant in previous {
        by_key.entry(variant.key()).or_insert(variant);
    }

    generated
        .into_iter()
        .map(|attributes| match by_key.get(&attributes.key()) {
            Some(old) => Variant {
                id: old.id,
                attributes,
                details: old.details.clone(),
            },
            None => Variant::skeleton(attributes),
        })
        .collect()
}
