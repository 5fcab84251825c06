//! Flattens a [`ProductForm`] into the ordered multipart fields the catalog
//! API accepts, e.g. `variants[0][attributes][Color]`.

use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::form::{ProductForm, ProductType};
use crate::variants::{ImageRef, Variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    /// Adds the `_method=PUT` override the API expects on multipart updates.
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: FormValue,
}

impl FormField {
    fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FormValue::Text(value.into()),
        }
    }

    fn image(name: impl Into<String>, image: &ImageRef) -> Self {
        let value = match image {
            ImageRef::Existing(path) => FormValue::Text(path.clone()),
            ImageRef::Upload(path) => FormValue::File(path.clone()),
        };
        Self {
            name: name.into(),
            value,
        }
    }

    /// The text value, or `None` for file fields.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            FormValue::Text(s) => Some(s),
            FormValue::File(_) => None,
        }
    }
}

fn decimal_or_zero(value: Option<Decimal>) -> String {
    value.map_or_else(|| "0".to_string(), |d| d.to_string())
}

fn count_or_zero(value: Option<u32>) -> String {
    value.unwrap_or(0).to_string()
}

impl ProductForm {
    /// Flattens the form into multipart fields, in submission order.
    ///
    /// Variants are only emitted for variable products.
    #[must_use]
    pub fn to_form_fields(&self, mode: SubmitMode) -> Vec<FormField> {
        let mut fields = Vec::new();

        if mode == SubmitMode::Update {
            fields.push(FormField::text("_method", "PUT"));
        }

        fields.push(FormField::text("name", self.name.as_str()));
        fields.push(FormField::text("slug", self.slug.as_str()));
        fields.push(FormField::text("price", decimal_or_zero(self.price)));
        fields.push(FormField::text("salePrice", decimal_or_zero(self.sale_price)));
        fields.push(FormField::text("sku", self.sku.as_str()));
        fields.push(FormField::text("stock", count_or_zero(self.stock)));
        fields.push(FormField::text(
            "description",
            self.description.as_deref().unwrap_or_default(),
        ));
        fields.push(FormField::text("productType", self.product_type.to_string()));
        fields.push(FormField::text(
            "productStatus",
            self.product_status.to_string(),
        ));

        for id in &self.categories {
            fields.push(FormField::text("categories[]", id.to_string()));
        }
        for id in &self.tags {
            fields.push(FormField::text("tags[]", id.to_string()));
        }

        if self.product_type == ProductType::Variable {
            for (index, variant) in self.variants().iter().enumerate() {
                push_variant(&mut fields, index, variant);
            }
        }

        match &self.featured_image {
            Some(ImageRef::Upload(path)) => fields.push(FormField {
                name: "featuredImage".to_string(),
                value: FormValue::File(path.clone()),
            }),
            Some(ImageRef::Existing(path)) => {
                fields.push(FormField::text("existingFeaturedImage", path.as_str()));
            }
            None => {}
        }

        for (index, image) in self.gallery.iter().enumerate() {
            match image {
                ImageRef::Existing(path) if self.removed_images.contains(path) => {}
                ImageRef::Existing(path) => {
                    fields.push(FormField::text("existingGalleryImages[]", path.as_str()));
                }
                ImageRef::Upload(path) => fields.push(FormField {
                    name: format!("gallery[{index}]"),
                    value: FormValue::File(path.clone()),
                }),
            }
        }

        for path in &self.removed_images {
            fields.push(FormField::text("removedImages[]", path.as_str()));
        }

        fields
    }
}

fn push_variant(fields: &mut Vec<FormField>, index: usize, variant: &Variant) {
    let details = &variant.details;
    let key = |field: &str| format!("variants[{index}][{field}]");

    fields.push(FormField::text(key("price"), decimal_or_zero(details.price)));
    if let Some(id) = variant.id {
        fields.push(FormField::text(key("id"), id.to_string()));
    }
    if let Some(sale_price) = details.sale_price {
        fields.push(FormField::text(key("salePrice"), sale_price.to_string()));
    }
    fields.push(FormField::text(
        key("sku"),
        details.sku.as_deref().unwrap_or_default(),
    ));
    fields.push(FormField::text(key("stock"), count_or_zero(details.stock)));

    for (name, value) in variant.attributes.iter() {
        fields.push(FormField::text(
            format!("variants[{index}][attributes][{name}]"),
            value,
        ));
    }

    if let Some(image) = &details.image {
        fields.push(FormField::image(key("image"), image));
    }
}
