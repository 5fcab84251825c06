//! Mapping of catalog API types into `catalog-core` domain types.

use catalog_core::{
    Attribute, AttributeCatalog, Combination, ImageRef, ProductForm, ProductStatus, ProductType,
    Variant, VariantDetails,
};

use crate::types::{ApiAttribute, ApiProduct, ApiVariant};

/// Converts the `/attributes` listing into a catalog, keeping API order.
#[must_use]
pub fn catalog_from_api(attributes: Vec<ApiAttribute>) -> AttributeCatalog {
    AttributeCatalog::new(
        attributes
            .into_iter()
            .map(|a| {
                Attribute::new(a.name, a.values.into_iter().map(|v| v.value)).with_id(a.id)
            })
            .collect(),
    )
}

fn stock_from_api(stock: Option<i64>, context: &str) -> Option<u32> {
    let raw = stock?;
    match u32::try_from(raw) {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(stock = raw, context, "stock out of range; treating as unset");
            None
        }
    }
}

/// Converts a persisted variant, resolving its attribute IDs through
/// `catalog`. Assignments whose attribute the catalog does not know are
/// dropped.
#[must_use]
pub fn variant_from_api(catalog: &AttributeCatalog, variant: ApiVariant) -> Variant {
    let mut attributes = Combination::new();
    for assignment in variant.attributes {
        match catalog.find_by_id(assignment.attribute_id) {
            Some(attribute) => attributes.insert(attribute.name.as_str(), assignment.value),
            None => tracing::warn!(
                variant_id = variant.id,
                attribute_id = assignment.attribute_id,
                "variant references an attribute missing from the catalog"
            ),
        }
    }

    Variant {
        id: Some(variant.id),
        attributes,
        details: VariantDetails {
            price: variant.price,
            sale_price: variant.sale_price,
            sku: variant.sku,
            stock: stock_from_api(variant.stock, "variant"),
            image: variant.image.map(ImageRef::Existing),
        },
    }
}

fn product_type_from_api(raw: Option<&str>) -> ProductType {
    match raw {
        Some("variable") => ProductType::Variable,
        _ => ProductType::Simple,
    }
}

fn product_status_from_api(raw: Option<&str>) -> ProductStatus {
    match raw {
        Some("draft") => ProductStatus::Draft,
        Some("private") => ProductStatus::Private,
        _ => ProductStatus::Published,
    }
}

/// Builds an edit form for a persisted product: product fields, images,
/// variants, and the option rows implied by the variants.
#[must_use]
pub fn product_form_from_api(catalog: &AttributeCatalog, product: ApiProduct) -> ProductForm {
    let product_type = product_type_from_api(product.product_type.as_deref());
    let variants = product
        .variants
        .into_iter()
        .map(|v| variant_from_api(catalog, v))
        .collect();

    let mut form = ProductForm::new(product.name, product_type).with_existing_variants(variants);
    form.slug = product.slug.unwrap_or_default();
    form.price = product.price;
    form.sale_price = product.sale_price;
    form.sku = product.sku.unwrap_or_default();
    form.stock = stock_from_api(product.stock, "product");
    form.description = product.description;
    form.product_status = product_status_from_api(product.product_status.as_deref());
    form.categories = product.categories.iter().map(|c| c.id).collect();
    form.tags = product.tags.iter().map(|t| t.id).collect();

    for image in product.images {
        if image.is_featured == 1 && form.featured_image.is_none() {
            form.featured_image = Some(ImageRef::Existing(image.image_path));
        } else {
            form.gallery.push(ImageRef::Existing(image.image_path));
        }
    }

    form
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{ApiAttributeValue, ApiImage, ApiNamedRef, ApiVariantAttribute};

    fn api_attribute(id: i64, name: &str, values: &[&str]) -> ApiAttribute {
        ApiAttribute {
            id,
            name: name.to_owned(),
            slug: Some(name.to_lowercase()),
            values: values
                .iter()
                .map(|v| ApiAttributeValue {
                    id: None,
                    attribute_id: Some(id),
                    value: (*v).to_owned(),
                })
                .collect(),
        }
    }

    fn catalog() -> AttributeCatalog {
        catalog_from_api(vec![
            api_attribute(1, "Color", &["Red", "Blue"]),
            api_attribute(2, "Size", &["S", "M"]),
        ])
    }

    fn api_variant(id: i64, pairs: &[(i64, &str)]) -> ApiVariant {
        ApiVariant {
            id,
            price: Some(Decimal::new(1000, 2)),
            sale_price: None,
            sku: Some(format!("SKU-{id}")),
            stock: Some(5),
            image: None,
            attributes: pairs
                .iter()
                .map(|(attribute_id, value)| ApiVariantAttribute {
                    attribute_id: *attribute_id,
                    value: (*value).to_owned(),
                })
                .collect(),
        }
    }

    fn api_product(variants: Vec<ApiVariant>) -> ApiProduct {
        ApiProduct {
            id: 10,
            name: "Tee".to_owned(),
            slug: Some("tee".to_owned()),
            price: Some(Decimal::new(2000, 2)),
            sale_price: None,
            sku: Some("TEE".to_owned()),
            stock: Some(-1),
            description: None,
            product_type: Some("variable".to_owned()),
            product_status: Some("draft".to_owned()),
            categories: vec![ApiNamedRef {
                id: 4,
                name: Some("Shirts".to_owned()),
            }],
            tags: vec![],
            images: vec![
                ApiImage {
                    image_path: "products/tee-back.jpg".to_owned(),
                    is_featured: 0,
                },
                ApiImage {
                    image_path: "products/tee.jpg".to_owned(),
                    is_featured: 1,
                },
            ],
            variants,
        }
    }

    #[test]
    fn catalog_keeps_ids_and_value_order() {
        let catalog = catalog();
        let color = catalog.find("Color").expect("Color present");
        assert_eq!(color.id, Some(1));
        assert_eq!(color.values, vec!["Red", "Blue"]);
    }

    #[test]
    fn variant_attributes_resolve_by_id() {
        let variant = variant_from_api(&catalog(), api_variant(7, &[(1, "Red"), (2, "M")]));
        assert_eq!(variant.id, Some(7));
        assert_eq!(variant.attributes.label(), "Color: Red, Size: M");
        assert_eq!(variant.details.stock, Some(5));
        assert_eq!(variant.details.sku.as_deref(), Some("SKU-7"));
    }

    #[test]
    fn unknown_attribute_ids_are_dropped() {
        let variant = variant_from_api(&catalog(), api_variant(7, &[(1, "Red"), (99, "Wool")]));
        assert_eq!(variant.attributes.len(), 1);
    }

    #[test]
    fn product_form_rebuilds_options_and_images() {
        let product = api_product(vec![
            api_variant(1, &[(1, "Red"), (2, "S")]),
            api_variant(2, &[(1, "Blue"), (2, "S")]),
        ]);
        let form = product_form_from_api(&catalog(), product);

        assert_eq!(form.product_type, ProductType::Variable);
        assert_eq!(form.product_status, ProductStatus::Draft);
        assert_eq!(form.categories, vec![4]);
        assert!(form.stock.is_none(), "negative stock should be dropped");
        assert_eq!(form.variants().len(), 2);
        assert_eq!(form.options().len(), 2);
        assert_eq!(form.options()[0].attribute_values, vec!["Red", "Blue"]);
        assert_eq!(
            form.featured_image,
            Some(ImageRef::Existing("products/tee.jpg".to_owned()))
        );
        assert_eq!(
            form.gallery,
            vec![ImageRef::Existing("products/tee-back.jpg".to_owned())]
        );
    }

    #[test]
    fn unknown_type_and_status_fall_back_to_defaults() {
        assert_eq!(product_type_from_api(None), ProductType::Simple);
        assert_eq!(product_status_from_api(Some("weird")), ProductStatus::Published);
    }
}
