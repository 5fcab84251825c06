//! Owned state of the product edit form.
//!
//! [`ProductForm`] is the single store the option editor, the variant
//! synchronizer and the variant editor all work against. The variant list
//! itself is only replaced by [`crate::sync::VariantSync`]; editors change
//! per-variant details through [`ProductForm::edit_variant`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Attribute, AttributeCatalog};
use crate::options::{options_from_variants, OptionSelection};
use crate::variants::{ImageRef, Variant, VariantDetails};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("option row {index} does not exist ({len} rows)")]
    NoSuchOption { index: usize, len: usize },

    #[error("variant {index} does not exist ({len} variants)")]
    NoSuchVariant { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Simple,
    Variable,
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductType::Simple => write!(f, "simple"),
            ProductType::Variable => write!(f, "variable"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Published,
    Draft,
    Private,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Published => write!(f, "published"),
            ProductStatus::Draft => write!(f, "draft"),
            ProductStatus::Private => write!(f, "private"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub slug: String,
    pub price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub sku: String,
    pub stock: Option<u32>,
    pub description: Option<String>,
    pub product_type: ProductType,
    pub product_status: ProductStatus,
    /// Category IDs.
    pub categories: Vec<i64>,
    /// Tag IDs.
    pub tags: Vec<i64>,
    pub featured_image: Option<ImageRef>,
    pub gallery: Vec<ImageRef>,
    /// Server paths of gallery images to delete on submit.
    pub removed_images: Vec<String>,
    options: Vec<OptionSelection>,
    variants: Vec<Variant>,
}

impl ProductForm {
    #[must_use]
    pub fn new(name: impl Into<String>, product_type: ProductType) -> Self {
        Self {
            name: name.into(),
            product_type,
            ..Self::default()
        }
    }

    /// Seeds the form for editing a persisted product: keeps its variants
    /// and rebuilds the option rows they imply.
    #[must_use]
    pub fn with_existing_variants(mut self, variants: Vec<Variant>) -> Self {
        self.options = options_from_variants(&variants);
        self.variants = variants;
        self
    }

    #[must_use]
    pub fn options(&self) -> &[OptionSelection] {
        &self.options
    }

    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub(crate) fn replace_variants(&mut self, variants: Vec<Variant>) {
        self.variants = variants;
    }

    /// Appends an empty option row and returns its index.
    pub fn add_option(&mut self) -> usize {
        self.options.push(OptionSelection::default());
        self.options.len() - 1
    }

    /// Removes an option row.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NoSuchOption`] if `index` is out of range.
    pub fn remove_option(&mut self, index: usize) -> Result<OptionSelection, FormError> {
        self.check_option(index)?;
        Ok(self.options.remove(index))
    }

    /// Chooses the attribute for a row and clears the row's values.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NoSuchOption`] if `index` is out of range.
    pub fn set_option_attribute(
        &mut self,
        index: usize,
        attribute: impl Into<String>,
    ) -> Result<(), FormError> {
        self.check_option(index)?;
        let row = &mut self.options[index];
        row.attribute_id = attribute.into();
        row.attribute_values.clear();
        Ok(())
    }

    /// Replaces the chosen values of a row.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NoSuchOption`] if `index` is out of range.
    pub fn set_option_values<I, V>(&mut self, index: usize, values: I) -> Result<(), FormError>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.check_option(index)?;
        self.options[index].attribute_values = values.into_iter().map(Into::into).collect();
        Ok(())
    }

    /// Catalog attributes row `index` may pick: everything not already chosen
    /// by another row, plus the row's own current choice.
    #[must_use]
    pub fn available_attributes<'c>(
        &self,
        catalog: &'c AttributeCatalog,
        index: usize,
    ) -> Vec<&'c Attribute> {
        let own = self.options.get(index).map(|r| r.attribute_id.as_str());
        catalog
            .iter()
            .filter(|attr| {
                Some(attr.name.as_str()) == own
                    || !self
                        .options
                        .iter()
                        .any(|r| !r.is_unset() && r.attribute_id == attr.name)
            })
            .collect()
    }

    /// Edits the user-editable fields of one variant.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NoSuchVariant`] if `index` is out of range.
    pub fn edit_variant<F>(&mut self, index: usize, edit: F) -> Result<(), FormError>
    where
        F: FnOnce(&mut VariantDetails),
    {
        let len = self.variants.len();
        let variant = self
            .variants
            .get_mut(index)
            .ok_or(FormError::NoSuchVariant { index, len })?;
        edit(&mut variant.details);
        Ok(())
    }

    fn check_option(&self, index: usize) -> Result<(), FormError> {
        if index < self.options.len() {
            Ok(())
        } else {
            Err(FormError::NoSuchOption {
                index,
                len: self.options.len(),
            })
        }
    }
}
