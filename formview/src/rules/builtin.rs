//! The built-in validator catalog.
//!
//! Built-ins are pure functions of the value and the rule arguments, except
//! `matches`, which reads the sibling field through the [`RuleContext`].

use std::sync::LazyLock;

use regex::Regex;

use super::RuleContext;
use crate::{FormError, Value};

/// RFC 2822 addresses: dot-atom or quoted-string local part (with folding
/// whitespace), and a domain that admits internationalized characters.
const EMAIL_PATTERN: &str = concat!(
    r"(?i)^(",
    r"([a-z0-9!#$%&'*+\-/=?^_`{|}~\x{A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]+",
    r"(\.[a-z0-9!#$%&'*+\-/=?^_`{|}~\x{A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]+)*)",
    r"|",
    r#"("((([\x20\x09]*\x0d\x0a)?[\x20\x09]+)?([\x01-\x08\x0b\x0c\x0e-\x1f\x7f\x21\x23-\x5b\x5d-\x7e\x{A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]|\\[\x01-\x09\x0b\x0c\x0d-\x7f\x{A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]))*(([\x20\x09]*\x0d\x0a)?[\x20\x09]+)?")"#,
    r")@(",
    r"([a-z0-9\x{A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]",
    r"|[a-z0-9\x{A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}][a-z0-9\-._~\x{A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]*[a-z0-9\x{A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}])\.",
    r")+(",
    r"[a-z\x{A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]",
    r"|[a-z\x{A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}][a-z0-9\-._~\x{A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]*[a-z\x{A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]",
    r")\.?$",
);

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"));
static ALPHA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z]+$").expect("alpha pattern is valid"));
static ALPHANUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z0-9]+$").expect("alphanum pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Required,
    Min,
    Max,
    Numeric,
    Alpha,
    Alphanum,
    Email,
    Boolean,
    Matches,
}

impl Builtin {
    pub const ALL: [Builtin; 9] = [
        Builtin::Required,
        Builtin::Min,
        Builtin::Max,
        Builtin::Numeric,
        Builtin::Alpha,
        Builtin::Alphanum,
        Builtin::Email,
        Builtin::Boolean,
        Builtin::Matches,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Min => "min",
            Self::Max => "max",
            Self::Numeric => "numeric",
            Self::Alpha => "alpha",
            Self::Alphanum => "alphanum",
            Self::Email => "email",
            Self::Boolean => "boolean",
            Self::Matches => "matches",
        }
    }

    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    pub fn check(
        &self,
        cx: &RuleContext<'_>,
        value: &Value,
        args: &[String],
    ) -> Result<bool, FormError> {
        let arg = args.first().map(String::as_str);
        Ok(match self {
            Self::Required => required(value),
            Self::Min => min_length(value, arg),
            Self::Max => max_length(value, arg),
            Self::Numeric => value.is_number(),
            Self::Alpha => matches_pattern(&ALPHA, value),
            Self::Alphanum => matches_pattern(&ALPHANUM, value),
            Self::Email => email(value),
            Self::Boolean => value.is_bool(),
            Self::Matches => {
                let other = arg.ok_or_else(|| FormError::missing_argument(self.name()))?;
                let other_value = cx
                    .field_value(other)
                    .ok_or_else(|| FormError::unknown_field(other))?;
                value.loose_eq(&other_value)
            }
        })
    }
}

/// Fails only for `Null`, `false` and the empty string. Zero passes.
pub fn required(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Passes unless the value has a length shorter than `min`. Values without a
/// length, and a non-numeric `min`, always pass.
pub fn min_length(value: &Value, min: Option<&str>) -> bool {
    match (value.length(), parse_bound(min)) {
        (Some(len), Some(min)) => len as f64 >= min,
        _ => true,
    }
}

/// Passes unless the value has a length longer than `max`.
pub fn max_length(value: &Value, max: Option<&str>) -> bool {
    match (value.length(), parse_bound(max)) {
        (Some(len), Some(max)) => len as f64 <= max,
        _ => true,
    }
}

pub fn email(value: &Value) -> bool {
    matches_pattern(&EMAIL, value)
}

fn matches_pattern(pattern: &Regex, value: &Value) -> bool {
    value.text().is_some_and(|text| pattern.is_match(&text))
}

fn parse_bound(arg: Option<&str>) -> Option<f64> {
    arg.and_then(|a| a.trim().parse::<f64>().ok())
}
