//! The data record a form is bound to

use std::collections::HashMap;
use std::fmt;

use super::Value;

type ChangeListener = Box<dyn FnMut(&[String])>;

/// A flat mapping from field name to [`Value`].
///
/// The record is the source of truth for field values outside the element
/// tree. Mutations notify every listener registered with
/// [`on_change`](Record::on_change) with the names that actually changed.
///
/// # Example
///
/// ```
/// use formview::{Record, Value};
///
/// let mut record = Record::new().set("fname", "Ada");
/// let changed = record.set_many([("fname", Value::from("Ada")), ("lname", Value::from("Lovelace"))]);
///
/// assert_eq!(changed, vec!["lname".to_string()]);
/// assert_eq!(record.get("fname"), Some(&Value::from("Ada")));
/// ```
#[derive(Default)]
pub struct Record {
    pub(crate) fields: HashMap<String, Value>,
    listeners: Vec<ChangeListener>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts a field value. Returns `true` if the stored value changed.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> bool {
        let field = field.into();
        if self.store(&field, value.into()) {
            self.notify(&[field]);
            true
        } else {
            false
        }
    }

    /// Sets several fields at once and notifies listeners a single time.
    /// Returns the names whose value changed, in the order given.
    pub fn set_many<K, V>(&mut self, values: impl IntoIterator<Item = (K, V)>) -> Vec<String>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut changed: Vec<String> = Vec::new();
        for (field, value) in values {
            let field = field.into();
            if self.store(&field, value.into()) && !changed.contains(&field) {
                changed.push(field);
            }
        }
        if !changed.is_empty() {
            self.notify(&changed);
        }
        changed
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        let removed = self.fields.remove(field);
        if removed.is_some() {
            self.notify(&[field.to_string()]);
        }
        removed
    }

    /// Serialize the record as a JSON object with sorted keys.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    // =========================================================================
    // Change notification
    // =========================================================================

    /// Register a listener called with the changed field names after every
    /// mutation that changed something.
    pub fn on_change(&mut self, listener: impl FnMut(&[String]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn store(&mut self, field: &str, value: Value) -> bool {
        if self.fields.get(field) == Some(&value) {
            return false;
        }
        self.fields.insert(field.to_string(), value);
        true
    }

    fn notify(&mut self, changed: &[String]) {
        log::trace!("[record] changed: {:?}", changed);
        for listener in &mut self.listeners {
            listener(changed);
        }
    }
}

/// Clones the field values only. Listeners are not carried over.
impl Clone for Record {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            listeners: Vec::new(),
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("fields", &self.fields)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            listeners: Vec::new(),
        }
    }
}
