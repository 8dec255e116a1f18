//! Declarative form configuration.
//!
//! A [`FormSchema`] is the class-level declaration shared by every form of
//! one kind: field defaults, the ordered field table and custom rules. It can
//! be built in code or loaded from JSON:
//!
//! ```
//! use formview::FormSchema;
//!
//! let schema = FormSchema::from_json(r#"{
//!     "defaults": { "field": { "validateOn": "blur" } },
//!     "fields": {
//!         "email": { "el": ".email", "required": true, "validations": { "email": "Invalid email" } },
//!         "pass2": { "el": ".pass2", "validations": { "matches:pass1": "Should match" } }
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(schema.fields[0].0, "email");
//! ```

use std::fmt;
use std::marker::PhantomData;

use formdom::EventKind;
use serde::Deserialize;
use serde::Deserializer;
use serde::de::MapAccess;
use serde::de::Visitor;

use crate::FormError;
use crate::rules::{CustomRules, RuleContext};
use crate::Value;

/// The event that triggers live validation of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Only validated as part of a submit.
    #[default]
    Submit,
    Blur,
    KeyUp,
    KeyDown,
    Change,
}

impl Trigger {
    pub fn event_kind(&self) -> EventKind {
        match self {
            Self::Submit => EventKind::Submit,
            Self::Blur => EventKind::Blur,
            Self::KeyUp => EventKind::KeyUp,
            Self::KeyDown => EventKind::KeyDown,
            Self::Change => EventKind::Change,
        }
    }

    pub fn fires_on(&self, kind: EventKind) -> bool {
        self.event_kind() == kind
    }
}

/// Marks a field as required, optionally with a custom message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Required {
    Default,
    Message(String),
}

impl Required {
    pub const DEFAULT_MESSAGE: &'static str = "This field is required";

    pub fn message(&self) -> &str {
        match self {
            Self::Default => Self::DEFAULT_MESSAGE,
            Self::Message(msg) => msg,
        }
    }
}

/// Configuration of one field, before defaults are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    /// Selector of the element bound to this field.
    pub el: String,
    #[serde(default, deserialize_with = "deserialize_required")]
    pub required: Option<Required>,
    #[serde(default)]
    pub validate_on: Option<Trigger>,
    /// Rule spec → failure message, in declaration order.
    #[serde(default, deserialize_with = "deserialize_ordered")]
    pub validations: Vec<(String, String)>,
}

impl FieldConfig {
    pub fn new(el: impl Into<String>) -> Self {
        Self {
            el: el.into(),
            ..Default::default()
        }
    }

    /// Require a value, failing with the default message.
    pub fn required(mut self) -> Self {
        self.required = Some(Required::Default);
        self
    }

    /// Require a value, failing with `msg`.
    pub fn required_message(mut self, msg: impl Into<String>) -> Self {
        self.required = Some(Required::Message(msg.into()));
        self
    }

    pub fn validate_on(mut self, trigger: Trigger) -> Self {
        self.validate_on = Some(trigger);
        self
    }

    /// Add a rule. A repeated rule spec replaces the earlier message in place.
    pub fn validation(mut self, rule: impl Into<String>, msg: impl Into<String>) -> Self {
        upsert(&mut self.validations, rule.into(), msg.into());
        self
    }
}

/// Values applied to every field that leaves them unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefaults {
    #[serde(default)]
    pub validate_on: Trigger,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormDefaults {
    #[serde(default)]
    pub field: FieldDefaults,
}

/// The class-level declaration of a form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormSchema {
    #[serde(default)]
    pub defaults: FormDefaults,
    #[serde(default, deserialize_with = "deserialize_ordered")]
    pub fields: Vec<(String, FieldConfig)>,
    #[serde(skip)]
    pub rules: CustomRules,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a schema from JSON. Field and validation order is preserved.
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn field(mut self, name: impl Into<String>, config: FieldConfig) -> Self {
        upsert(&mut self.fields, name.into(), config);
        self
    }

    pub fn default_trigger(mut self, trigger: Trigger) -> Self {
        self.defaults.field.validate_on = trigger;
        self
    }

    /// Register a custom rule shared by every form built from this schema.
    pub fn rule<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&RuleContext<'_>, &Value, &[String]) -> bool + Send + Sync + 'static,
    {
        self.rules.insert(name, rule);
        self
    }
}

/// Insert or replace `key`, keeping the position of an existing entry.
pub(crate) fn upsert<T>(entries: &mut Vec<(String, T)>, key: String, value: T) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

// =============================================================================
// Deserialization helpers
// =============================================================================

/// `true` → default message, a non-empty string → custom message,
/// `false`/`""`/`null` → not required.
fn deserialize_required<'de, D>(deserializer: D) -> Result<Option<Required>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RequiredRepr {
        Flag(bool),
        Message(String),
    }

    Ok(match Option::<RequiredRepr>::deserialize(deserializer)? {
        Some(RequiredRepr::Flag(true)) => Some(Required::Default),
        Some(RequiredRepr::Message(msg)) if !msg.is_empty() => Some(Required::Message(msg)),
        _ => None,
    })
}

/// A JSON object as an ordered list of entries.
fn deserialize_ordered<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct OrderedVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedVisitor<T> {
        type Value = Vec<(String, T)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map")
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut entries = Vec::new();
            while let Some((key, value)) = map.next_entry::<String, T>()? {
                upsert(&mut entries, key, value);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(OrderedVisitor(PhantomData))
}
