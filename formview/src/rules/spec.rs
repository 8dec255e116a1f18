use crate::FormError;

/// A parsed rule spec: `name` or `name:arg1:arg2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub name: String,
    pub args: Vec<String>,
}

impl RuleSpec {
    pub fn parse(spec: &str) -> Result<Self, FormError> {
        let mut segments = spec.split(':');
        let name = segments.next().unwrap_or_default();
        if name.is_empty() {
            return Err(FormError::EmptyRule);
        }

        Ok(Self {
            name: name.to_string(),
            args: segments.map(str::to_string).collect(),
        })
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}
