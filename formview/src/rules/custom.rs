use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::RuleContext;
use crate::Value;

/// Signature of an instance rule: the bound form context, the field value
/// and the positional rule arguments.
pub type RuleFn = dyn Fn(&RuleContext<'_>, &Value, &[String]) -> bool + Send + Sync;

/// Rules registered on a schema or a single form. Never shared with the
/// built-in catalog.
#[derive(Clone, Default)]
pub struct CustomRules {
    rules: HashMap<String, Arc<RuleFn>>,
}

impl CustomRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<F>(&mut self, name: impl Into<String>, rule: F)
    where
        F: Fn(&RuleContext<'_>, &Value, &[String]) -> bool + Send + Sync + 'static,
    {
        self.rules.insert(name.into(), Arc::new(rule));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<RuleFn>> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Layer `other` on top of these rules; `other` wins on name clashes.
    pub fn merged(mut self, other: CustomRules) -> Self {
        self.rules.extend(other.rules);
        self
    }
}

impl fmt::Debug for CustomRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.rules.keys().collect();
        names.sort();
        f.debug_set().entries(names).finish()
    }
}
