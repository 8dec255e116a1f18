//! Validator registry.
//!
//! A rule spec is resolved in a fixed order:
//!
//! 1. `required` always uses the built-in predicate.
//! 2. Custom rules registered on the form (or its schema).
//! 3. The built-in catalog ([`Builtin`]).
//!
//! A name found in neither tier is a configuration error.

mod builtin;
mod custom;
mod spec;

use std::sync::Arc;

pub use builtin::{Builtin, email, max_length, min_length, required};
pub use custom::{CustomRules, RuleFn};
pub use spec::RuleSpec;

use crate::accessor::{self, RenderedTree};
use crate::{FieldTable, FormError, Record, Value};

/// Where a rule name resolved to.
#[derive(Clone)]
pub enum Resolved {
    Builtin(Builtin),
    Custom(Arc<RuleFn>),
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin(b) => write!(f, "Builtin({})", b.name()),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// The form a rule runs against. Gives rules read access to sibling fields.
pub struct RuleContext<'a> {
    fields: &'a FieldTable,
    rules: &'a CustomRules,
    record: &'a Record,
    tree: Option<&'a dyn RenderedTree>,
}

impl<'a> RuleContext<'a> {
    pub(crate) fn new(
        fields: &'a FieldTable,
        rules: &'a CustomRules,
        record: &'a Record,
        tree: Option<&'a dyn RenderedTree>,
    ) -> Self {
        Self {
            fields,
            rules,
            record,
            tree,
        }
    }

    /// Current value of a declared field, read from its element.
    /// `None` if no field with that name is declared.
    pub fn field_value(&self, name: &str) -> Option<Value> {
        let descriptor = self.fields.get(name)?;
        Some(accessor::read(self.tree, descriptor))
    }

    pub fn record(&self) -> &Record {
        self.record
    }

    pub fn fields(&self) -> &FieldTable {
        self.fields
    }

    pub(crate) fn tree(&self) -> Option<&'a dyn RenderedTree> {
        self.tree
    }

    pub fn resolve(&self, name: &str) -> Option<Resolved> {
        if name == Builtin::Required.name() {
            return Some(Resolved::Builtin(Builtin::Required));
        }
        if let Some(rule) = self.rules.get(name) {
            return Some(Resolved::Custom(Arc::clone(rule)));
        }
        Builtin::lookup(name).map(Resolved::Builtin)
    }

    /// Evaluate one rule spec against `value`.
    pub fn dispatch(&self, rule: &str, value: &Value) -> Result<bool, FormError> {
        let spec = RuleSpec::parse(rule)?;
        let resolved = self
            .resolve(&spec.name)
            .ok_or_else(|| FormError::unknown_validator(&spec.name))?;

        let passed = match &resolved {
            Resolved::Builtin(builtin) => builtin.check(self, value, &spec.args)?,
            Resolved::Custom(rule) => rule(self, value, spec.args.as_slice()),
        };
        log::trace!(
            "[rules] {} via {:?} on {:?}: {}",
            rule,
            resolved,
            value,
            if passed { "pass" } else { "fail" }
        );
        Ok(passed)
    }
}

/// Evaluate a rule spec outside any form: only the built-in catalog is
/// available, and `matches` has no fields to compare against.
pub fn validate_rule(value: &Value, rule: &str) -> Result<bool, FormError> {
    let fields = FieldTable::empty();
    let rules = CustomRules::default();
    let record = Record::new();
    RuleContext::new(&fields, &rules, &record, None).dispatch(rule, value)
}
