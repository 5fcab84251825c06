use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A named axis of product variation, e.g. `Color`, with the ordered catalog
/// of every value it can take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Backend ID. Absent for attributes loaded from a local catalog file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub values: Vec<String>,
}

impl Attribute {
    pub fn new<N, I, V>(name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            id: None,
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// The attribute catalog for one editing session. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeCatalog {
    pub attributes: Vec<Attribute>,
}

impl AttributeCatalog {
    #[must_use]
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    /// Looks up an attribute by exact name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    #[must_use]
    pub fn find_by_id(&self, id: i64) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id == Some(id))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<'a> IntoIterator for &'a AttributeCatalog {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

/// Load and validate an attribute catalog from a YAML file of the form
/// `attributes: [{ name, values: [...] }]`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<AttributeCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: AttributeCatalog =
        serde_yaml::from_str(&content).map_err(ConfigError::CatalogFileParse)?;

    validate_catalog(&catalog)?;

    tracing::debug!(
        path = %path.display(),
        attributes = catalog.len(),
        "loaded attribute catalog"
    );

    Ok(catalog)
}

fn validate_catalog(catalog: &AttributeCatalog) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for attribute in catalog {
        if attribute.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "attribute name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(attribute.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate attribute name: '{}'",
                attribute.name
            )));
        }

        let mut seen_values = HashSet::new();
        for value in &attribute.values {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "attribute '{}' has an empty value",
                    attribute.name
                )));
            }
            if !seen_values.insert(value.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "attribute '{}' lists value '{}' more than once",
                    attribute.name, value
                )));
            }
        }
    }

    Ok(())
}
