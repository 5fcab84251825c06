//! Keeps a form's variant list in step with its option rows.
//!
//! [`VariantSync`] derives the active attributes from the option rows,
//! generates their combinations, merges in the details the user already
//! entered for combinations that still exist, and publishes the result to
//! the form and to a [`VariantListener`].

use crate::catalog::AttributeCatalog;
use crate::combinations::generate_combinations;
use crate::form::ProductForm;
use crate::options::{derive_active_attributes, OptionSelection};
use crate::variants::{merge_variants, Variant};

/// Receives the variant list every time it is regenerated.
pub trait VariantListener {
    fn variants_changed(&mut self, variants: &[Variant]);
}

impl<F> VariantListener for F
where
    F: FnMut(&[Variant]),
{
    fn variants_changed(&mut self, variants: &[Variant]) {
        self(variants);
    }
}

/// A listener that ignores every update.
impl VariantListener for () {
    fn variants_changed(&mut self, _variants: &[Variant]) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The option rows match the last synchronized snapshot; nothing ran.
    Unchanged,
    Regenerated {
        /// Size of the new variant list.
        variants: usize,
        /// How many of them inherited details or an ID from the old list.
        carried: usize,
    },
}

pub struct VariantSync<L = ()> {
    catalog: AttributeCatalog,
    listener: L,
    last_options: Option<Vec<OptionSelection>>,
}

impl VariantSync<()> {
    #[must_use]
    pub fn new(catalog: AttributeCatalog) -> Self {
        Self::with_listener(catalog, ())
    }
}

impl<L: VariantListener> VariantSync<L> {
    pub fn with_listener(catalog: AttributeCatalog, listener: L) -> Self {
        Self {
            catalog,
            listener,
            last_options: None,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }

    /// Swaps in a freshly loaded catalog. The next
    /// [`sync_if_changed`](Self::sync_if_changed) always regenerates.
    pub fn set_catalog(&mut self, catalog: AttributeCatalog) {
        self.catalog = catalog;
        self.last_options = None;
    }

    /// Regenerates only when the form's option rows differ from the last
    /// snapshot this synchronizer processed.
    pub fn sync_if_changed(&mut self, form: &mut ProductForm) -> SyncOutcome {
        if self.last_options.as_deref() == Some(form.options()) {
            return SyncOutcome::Unchanged;
        }
        self.sync(form)
    }

    /// Regenerates the variant list from the form's current option rows.
    pub fn sync(&mut self, form: &mut ProductForm) -> SyncOutcome {
        let active = derive_active_attributes(&self.catalog, form.options());

        let variants = if active.is_empty() {
            Vec::new()
        } else {
            merge_variants(form.variants(), generate_combinations(&active))
        };

        let carried = variants
            .iter()
            .filter(|v| v.id.is_some() || !v.details.is_blank())
            .count();

        tracing::info!(
            attributes = active.len(),
            variants = variants.len(),
            carried,
            "regenerated product variants"
        );

        self.last_options = Some(form.options().to_vec());
        form.replace_variants(variants);
        self.listener.variants_changed(form.variants());

        SyncOutcome::Regenerated {
            variants: form.variants().len(),
            carried,
        }
    }

    pub fn into_listener(self) -> L {
        self.listener
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::Attribute;
    use crate::form::ProductType;

    fn catalog() -> AttributeCatalog {
        AttributeCatalog::new(vec![
            Attribute::new("Color", ["Red", "Blue", "Green"]),
            Attribute::new("Size", ["S", "M"]),
        ])
    }

    fn form_with(rows: &[(&str, &[&str])]) -> ProductForm {
        let mut form = ProductForm::new("Tee", ProductType::Variable);
        for (attribute, values) in rows {
            let i = form.add_option();
            form.set_option_attribute(i, *attribute).unwrap();
            form.set_option_values(i, values.iter().copied()).unwrap();
        }
        form
    }

    fn labels(form: &ProductForm) -> Vec<String> {
        form.variants().iter().map(|v| v.attributes.label()).collect()
    }

    #[test]
    fn color_and_size_generate_four_variants() {
        let mut form = form_with(&[("Color", &["Red", "Blue"]), ("Size", &["S", "M"])]);
        let outcome = VariantSync::new(catalog()).sync(&mut form);

        assert_eq!(
            outcome,
            SyncOutcome::Regenerated {
                variants: 4,
                carried: 0
            }
        );
        assert_eq!(
            labels(&form),
            vec![
                "Color: Red, Size: S",
                "Color: Red, Size: M",
                "Color: Blue, Size: S",
                "Color: Blue, Size: M",
            ]
        );
        assert!(form.variants().iter().all(|v| v.id.is_none()));
    }

    #[test]
    fn single_attribute_has_no_other_keys() {
        let mut form = form_with(&[("Color", &["Red", "Blue", "Green"])]);
        VariantSync::new(catalog()).sync(&mut form);
        assert_eq!(form.variants().len(), 3);
        assert!(form.variants().iter().all(|v| v.attributes.len() == 1));
    }

    #[test]
    fn row_without_values_yields_empty_list() {
        let mut form = form_with(&[("Color", &[])]);
        let mut published: Option<usize> = None;
        let mut sync = VariantSync::with_listener(catalog(), |v: &[Variant]| {
            published = Some(v.len());
        });
        sync.sync(&mut form);
        drop(sync);

        assert!(form.variants().is_empty());
        assert_eq!(published, Some(0));
    }

    #[test]
    fn no_rows_clears_previous_variants() {
        let mut form = form_with(&[("Color", &["Red"])]);
        let mut sync = VariantSync::new(catalog());
        sync.sync(&mut form);
        assert_eq!(form.variants().len(), 1);

        form.remove_option(0).unwrap();
        sync.sync(&mut form);
        assert!(form.variants().is_empty());
    }

    #[test]
    fn listener_sees_same_list_as_form() {
        let mut form = form_with(&[("Color", &["Red", "Blue"])]);
        let mut seen: Vec<Vec<Variant>> = Vec::new();
        let mut sync = VariantSync::with_listener(catalog(), |v: &[Variant]| seen.push(v.to_vec()));
        sync.sync(&mut form);
        drop(sync);

        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], form.variants());
    }

    #[test]
    fn repeated_sync_is_idempotent() {
        let mut form = form_with(&[("Color", &["Red", "Blue"]), ("Size", &["S"])]);
        let mut sync = VariantSync::new(catalog());
        sync.sync(&mut form);
        let first = form.variants().to_vec();
        sync.sync(&mut form);
        assert_eq!(form.variants(), first.as_slice());
    }

    #[test]
    fn sync_if_changed_skips_unchanged_rows() {
        let mut form = form_with(&[("Color", &["Red"])]);
        let mut calls = 0;
        let mut sync = VariantSync::with_listener(catalog(), |_: &[Variant]| calls += 1);

        assert!(matches!(
            sync.sync_if_changed(&mut form),
            SyncOutcome::Regenerated { .. }
        ));
        assert_eq!(sync.sync_if_changed(&mut form), SyncOutcome::Unchanged);

        form.set_option_values(0, ["Red", "Green"]).unwrap();
        assert!(matches!(
            sync.sync_if_changed(&mut form),
            SyncOutcome::Regenerated { variants: 2, .. }
        ));
        drop(sync);
        assert_eq!(calls, 2);
    }

    #[test]
    fn set_catalog_forces_regeneration() {
        let mut form = form_with(&[("Color", &["Red"])]);
        let mut sync = VariantSync::new(AttributeCatalog::default());
        sync.sync_if_changed(&mut form);
        assert!(form.variants().is_empty());

        sync.set_catalog(catalog());
        assert!(matches!(
            sync.sync_if_changed(&mut form),
            SyncOutcome::Regenerated { variants: 1, .. }
        ));
    }

    #[test]
    fn edits_survive_adding_a_value() {
        let mut form = form_with(&[("Color", &["Red", "Blue"])]);
        let mut sync = VariantSync::new(catalog());
        sync.sync(&mut form);
        form.edit_variant(1, |d| {
            d.price = Some(Decimal::new(1999, 2));
            d.sku = Some("TEE-BLUE".to_string());
        })
        .unwrap();

        form.set_option_values(0, ["Red", "Blue", "Green"]).unwrap();
        let outcome = sync.sync(&mut form);

        assert_eq!(
            outcome,
            SyncOutcome::Regenerated {
                variants: 3,
                carried: 1
            }
        );
        let blue = &form.variants()[1];
        assert_eq!(blue.attributes.get("Color"), Some("Blue"));
        assert_eq!(blue.details.sku.as_deref(), Some("TEE-BLUE"));
        assert_eq!(blue.details.price, Some(Decimal::new(1999, 2)));
    }

    #[test]
    fn adding_an_attribute_starts_fresh_combinations() {
        let mut form = form_with(&[("Color", &["Red"])]);
        let mut sync = VariantSync::new(catalog());
        sync.sync(&mut form);
        form.edit_variant(0, |d| d.stock = Some(3)).unwrap();

        let i = form.add_option();
        form.set_option_attribute(i, "Size").unwrap();
        form.set_option_values(i, ["S"]).unwrap();
        sync.sync(&mut form);

        assert_eq!(form.variants().len(), 1);
        assert!(form.variants()[0].details.is_blank());
    }

    #[test]
    fn persisted_variants_keep_ids_through_regeneration() {
        let mut persisted = Variant::skeleton(
            crate::combinations::Combination::new()
                .with("Color", "Red")
                .with("Size", "S"),
        );
        persisted.id = Some(77);
        let mut form =
            ProductForm::new("Tee", ProductType::Variable).with_existing_variants(vec![persisted]);

        form.set_option_values(1, ["S", "M"]).unwrap();
        VariantSync::new(catalog()).sync(&mut form);

        assert_eq!(form.variants().len(), 2);
        assert_eq!(form.variants()[0].id, Some(77));
        assert_eq!(form.variants()[1].id, None);
    }

    #[test]
    fn duplicate_attribute_rows_use_first_row() {
        let mut form = form_with(&[("Color", &["Red"]), ("Color", &["Blue", "Green"])]);
        VariantSync::new(catalog()).sync(&mut form);
        assert_eq!(labels(&form), vec!["Color: Red"]);
    }
}
