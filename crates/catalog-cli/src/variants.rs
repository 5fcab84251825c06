//! Offline commands: variant generation and payload preview from a local
//! YAML catalog. Neither touches the API.

use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use catalog_core::{
    load_catalog, FormField, FormValue, ProductForm, ProductType, SubmitMode, VariantSync,
};

/// One `--option Name=value1,value2` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionArg {
    pub attribute: String,
    pub values: Vec<String>,
}

impl FromStr for OptionArg {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (name, values) = raw
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=VALUES, got '{raw}'"))?;
        let attribute = name.trim();
        if attribute.is_empty() {
            return Err(format!("missing attribute name in '{raw}'"));
        }
        Ok(Self {
            attribute: attribute.to_string(),
            values: values
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

/// Builds a variable product form from the option arguments and runs one
/// variant sync over it.
pub(crate) fn build_form(
    catalog_path: &Path,
    options: &[OptionArg],
    name: &str,
) -> anyhow::Result<ProductForm> {
    let catalog = load_catalog(catalog_path)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;

    let mut form = ProductForm::new(name, ProductType::Variable);
    for option in options {
        let row = form.add_option();
        form.set_option_attribute(row, option.attribute.as_str())?;
        form.set_option_values(row, option.values.iter().cloned())?;
    }

    let outcome = VariantSync::new(catalog).sync(&mut form);
    tracing::debug!(?outcome, "variant list built");
    Ok(form)
}

/// Prints the generated variants as pretty JSON.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the variants cannot be
/// serialized.
pub(crate) fn run_variants(catalog_path: &Path, options: &[OptionArg]) -> anyhow::Result<()> {
    let form = build_form(catalog_path, options, "")?;
    println!("{}", serde_json::to_string_pretty(form.variants())?);
    Ok(())
}

/// Renders a field as `name=value`, or `name=@path` for uploads.
pub(crate) fn format_field(field: &FormField) -> String {
    match &field.value {
        FormValue::Text(text) => format!("{}={text}", field.name),
        FormValue::File(path) => format!("{}=@{}", field.name, path.display()),
    }
}

/// Prints the multipart fields of a variable product, one per line.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub(crate) fn run_payload(
    catalog_path: &Path,
    options: &[OptionArg],
    name: &str,
    update: bool,
) -> anyhow::Result<()> {
    let form = build_form(catalog_path, options, name)?;
    let mode = if update {
        SubmitMode::Update
    } else {
        SubmitMode::Create
    };
    for field in form.to_form_fields(mode) {
        println!("{}", format_field(&field));
    }
    Ok(())
}
