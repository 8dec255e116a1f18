//! The resolved, immutable field table of one form.

use formdom::Selector;

use crate::config::{FieldConfig, FieldDefaults, Required, Trigger, upsert};
use crate::FormError;

/// A field after defaults have been applied and its selector parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    /// Selector source, as configured.
    pub el: String,
    pub selector: Selector,
    pub required: Option<Required>,
    pub validate_on: Trigger,
    /// Rule spec → failure message, in declaration order.
    pub validations: Vec<(String, String)>,
}

impl FieldDescriptor {
    fn resolve(name: String, config: FieldConfig, defaults: &FieldDefaults) -> Result<Self, FormError> {
        let selector = Selector::parse(&config.el).map_err(|source| FormError::Selector {
            field: name.clone(),
            source,
        })?;

        Ok(Self {
            name,
            el: config.el,
            selector,
            required: config.required,
            validate_on: config.validate_on.unwrap_or(defaults.validate_on),
            validations: config.validations,
        })
    }
}

/// Field descriptors in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTable {
    fields: Vec<FieldDescriptor>,
}

impl FieldTable {
    pub(crate) fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    /// Merge configuration layers into a table. A later entry with the same
    /// name replaces the earlier one in place; new names are appended.
    pub(crate) fn merge(
        defaults: &FieldDefaults,
        layers: impl IntoIterator<Item = (String, FieldConfig)>,
    ) -> Result<Self, FormError> {
        let mut merged: Vec<(String, FieldConfig)> = Vec::new();
        for (name, config) in layers {
            upsert(&mut merged, name, config);
        }

        if merged.is_empty() {
            return Err(FormError::NoFields);
        }

        let fields = merged
            .into_iter()
            .map(|(name, config)| FieldDescriptor::resolve(name, config, defaults))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { fields })
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldTable {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
