use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

/// Every failure message of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Field name.
    pub field: String,
    /// Selector of the field's element.
    pub el: String,
    /// Failure messages, in rule declaration order.
    #[serde(rename = "error")]
    pub messages: Vec<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, el: impl Into<String>, messages: Vec<String>) -> Self {
        Self {
            field: field.into(),
            el: el.into(),
            messages,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.messages.join("; "))
    }
}

/// The invalid fields of one validation pass, in declaration order.
/// A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrorSet {
    errors: Vec<ValidationError>,
}

impl FormErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Check if every field passed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of invalid fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Names of the invalid fields.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }

    /// The first invalid field, if any.
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }
}

impl IntoIterator for FormErrorSet {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a FormErrorSet {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Serializes as `{ field: { field, el, error } }`.
impl Serialize for FormErrorSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for error in &self.errors {
            map.serialize_entry(&error.field, error)?;
        }
        map.end()
    }
}
