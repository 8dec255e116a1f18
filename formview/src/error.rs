//! Configuration errors raised by the form layer.
//!
//! Validation failures are never errors; they are returned as
//! [`ValidationError`](crate::ValidationError) data.

use formdom::SelectorError;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The merged field table is empty.
    #[error("Fields must be provided")]
    NoFields,

    /// A rule spec was empty.
    #[error("Not passed a validation to test")]
    EmptyRule,

    /// A rule spec names a validator that is neither custom nor built in.
    #[error("Validator does not exist: {name}")]
    UnknownValidator { name: String },

    /// A field name that is not declared on the form.
    #[error("Field '{field}' is not declared on this form")]
    UnknownField { field: String },

    /// A parameterized rule was used without its argument.
    #[error("Validator '{rule}' requires an argument")]
    MissingArgument { rule: String },

    /// A field's element selector does not parse.
    #[error("Invalid selector for field '{field}': {source}")]
    Selector {
        field: String,
        #[source]
        source: SelectorError,
    },

    #[error("Form is already attached to a rendered tree")]
    AlreadyAttached,

    #[error("Form is not attached to a rendered tree")]
    Detached,

    /// A form schema could not be parsed.
    #[error("Invalid form configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl FormError {
    pub fn unknown_validator(name: impl Into<String>) -> Self {
        Self::UnknownValidator { name: name.into() }
    }

    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    pub fn missing_argument(rule: impl Into<String>) -> Self {
        Self::MissingArgument { rule: rule.into() }
    }
}
