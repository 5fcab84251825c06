//! Catalog API response types.
//!
//! These mirror the JSON the backend returns (snake_case, prices as either
//! strings or numbers). [`crate::normalize`] maps them into `catalog-core`
//! types.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// GET /attributes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ApiAttribute {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub values: Vec<ApiAttributeValue>,
}

/// One value of an attribute. The nested listing under `/attributes` only
/// carries `value`; `/attributes/{id}/values` also sends the IDs.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiAttributeValue {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, alias = "attributeId")]
    pub attribute_id: Option<i64>,
    pub value: String,
}

// ---------------------------------------------------------------------------
// GET /categories, GET /tags
// ---------------------------------------------------------------------------

/// A category or tag as the taxonomy endpoints return it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiTerm {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /products/{id}
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ApiProduct {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "decimal_opt")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_opt")]
    pub sale_price: Option<Decimal>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub product_status: Option<String>,
    #[serde(default)]
    pub categories: Vec<ApiNamedRef>,
    #[serde(default)]
    pub tags: Vec<ApiNamedRef>,
    #[serde(default)]
    pub images: Vec<ApiImage>,
    #[serde(default)]
    pub variants: Vec<ApiVariant>,
}

/// A category or tag attached to a product.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiNamedRef {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiImage {
    pub image_path: String,
    /// `1` for the featured image, `0` for gallery images.
    #[serde(default)]
    pub is_featured: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiVariant {
    pub id: i64,
    #[serde(default, deserialize_with = "decimal_opt")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_opt")]
    pub sale_price: Option<Decimal>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub attributes: Vec<ApiVariantAttribute>,
}

/// One attribute assignment on a persisted variant. The attribute is
/// referenced by backend ID, not by name.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiVariantAttribute {
    pub attribute_id: i64,
    pub value: String,
}

/// Error body the API sends with 422 responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    String(String),
}

/// Accepts `"12.50"`, `12.5`, or `null`.
fn decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    let text = match raw {
        None => return Ok(None),
        Some(NumberOrString::Number(n)) => n.to_string(),
        Some(NumberOrString::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(NumberOrString::String(s)) => s,
    };
    Decimal::from_str(text.trim())
        .map(Some)
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_parses_nested_values() {
        let attr: ApiAttribute = serde_json::from_str(
            r#"{"id": 3, "name": "Color", "slug": "color",
                "values": [{"value": "Red"}, {"value": "Blue"}]}"#,
        )
        .expect("attribute should parse");
        assert_eq!(attr.id, 3);
        assert_eq!(attr.values.len(), 2);
        assert_eq!(attr.values[1].value, "Blue");
    }

    #[test]
    fn attribute_value_accepts_camel_case_parent_id() {
        let value: ApiAttributeValue =
            serde_json::from_str(r#"{"id": 9, "attributeId": 3, "value": "Navy"}"#)
                .expect("value should parse");
        assert_eq!(value.id, Some(9));
        assert_eq!(value.attribute_id, Some(3));
    }

    #[test]
    fn term_slug_is_optional() {
        let term: ApiTerm =
            serde_json::from_str(r#"{"id": 4, "name": "Shirts"}"#).expect("term should parse");
        assert_eq!(term.name, "Shirts");
        assert!(term.slug.is_none());
    }

    #[test]
    fn variant_prices_accept_strings_and_numbers() {
        let variant: ApiVariant = serde_json::from_str(
            r#"{"id": 1, "price": "19.90", "sale_price": 15, "attributes": []}"#,
        )
        .expect("variant should parse");
        assert_eq!(variant.price, Some(Decimal::new(1990, 2)));
        assert_eq!(variant.sale_price, Some(Decimal::new(15, 0)));
    }

    #[test]
    fn variant_null_and_empty_prices_are_none() {
        let variant: ApiVariant =
            serde_json::from_str(r#"{"id": 1, "price": null, "sale_price": ""}"#)
                .expect("variant should parse");
        assert!(variant.price.is_none());
        assert!(variant.sale_price.is_none());
        assert!(variant.attributes.is_empty());
    }

    #[test]
    fn malformed_price_is_an_error() {
        let result = serde_json::from_str::<ApiVariant>(r#"{"id": 1, "price": "abc"}"#);
        assert!(result.is_err());
    }
}
