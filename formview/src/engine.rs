//! Field validation.
//!
//! A required field that is empty fails with the required message alone.
//! Otherwise every configured rule runs and each failure contributes its
//! message, in declaration order.

use crate::accessor;
use crate::rules::{self, RuleContext};
use crate::{FieldDescriptor, FormError, ValidationError};

/// Validate one field against its current element value.
///
/// Returns `Ok(None)` when the field is valid. Configuration errors (an
/// unknown validator, a `matches` against an undeclared field) abort the
/// field instead of counting as a failure.
pub(crate) fn validate_field(
    cx: &RuleContext<'_>,
    descriptor: &FieldDescriptor,
) -> Result<Option<ValidationError>, FormError> {
    let value = accessor::read(cx.tree(), descriptor);

    if let Some(required) = &descriptor.required
        && !rules::required(&value)
    {
        log::debug!("[engine] {} is required", descriptor.name);
        return Ok(Some(ValidationError::new(
            &descriptor.name,
            &descriptor.el,
            vec![required.message().to_string()],
        )));
    }

    let mut messages = Vec::new();
    for (rule, message) in &descriptor.validations {
        if !cx.dispatch(rule, &value)? {
            messages.push(message.clone());
        }
    }

    if messages.is_empty() {
        log::trace!("[engine] {} is valid", descriptor.name);
        return Ok(None);
    }

    log::debug!("[engine] {} failed {} rule(s)", descriptor.name, messages.len());
    Ok(Some(ValidationError::new(
        &descriptor.name,
        &descriptor.el,
        messages,
    )))
}
