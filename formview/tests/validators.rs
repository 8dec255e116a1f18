use formview::rules::Builtin;
use formview::{FormError, Value, validate_rule};

fn check(value: impl Into<Value>, rule: &str) -> bool {
    validate_rule(&value.into(), rule).unwrap()
}

// ============================================================================
// required
// ============================================================================

#[test]
fn test_required_fails_on_empty_values() {
    assert!(!check(Value::Null, "required"));
    assert!(!check(false, "required"));
    assert!(!check("", "required"));
}

#[test]
fn test_required_passes_zero_and_text() {
    assert!(check(0, "required"));
    assert!(check(0.0, "required"));
    assert!(check("x", "required"));
    assert!(check(true, "required"));
    assert!(check(" ", "required"));
}

#[test]
fn test_required_ignores_arguments() {
    assert!(!check("", "required:ignored"));
    assert!(check("x", "required:ignored"));
}

// ============================================================================
// min / max
// ============================================================================

#[test]
fn test_min_length() {
    assert!(!check("ab", "min:3"));
    assert!(check("abc", "min:3"));
    assert!(check("abcd", "min:3"));
    assert!(!check("", "min:1"));
}

#[test]
fn test_max_length() {
    assert!(check("abc", "max:3"));
    assert!(!check("abcd", "max:3"));
}

#[test]
fn test_length_counts_characters() {
    assert!(check("héé", "max:3"));
    assert!(check("日本語", "min:3"));
}

#[test]
fn test_length_of_lists() {
    assert!(!check(vec!["a"], "min:2"));
    assert!(check(vec!["a", "b"], "min:2"));
    assert!(!check(vec![1, 2, 3], "max:2"));
}

#[test]
fn test_length_rules_pass_without_a_length() {
    assert!(check(12345, "max:2"));
    assert!(check(true, "min:10"));
    assert!(check(Value::Null, "min:10"));
}

#[test]
fn test_length_rules_pass_on_non_numeric_bound() {
    assert!(check("ab", "min:lots"));
    assert!(check("ab", "min"));
}

// ============================================================================
// Type rules
// ============================================================================

#[test]
fn test_numeric_accepts_numbers_only() {
    assert!(check(42, "numeric"));
    assert!(check(4.2, "numeric"));
    assert!(!check("42", "numeric"));
    assert!(!check(Value::Null, "numeric"));
}

#[test]
fn test_boolean() {
    assert!(check(true, "boolean"));
    assert!(check(false, "boolean"));
    assert!(!check("true", "boolean"));
    assert!(!check(1, "boolean"));
}

#[test]
fn test_alpha() {
    assert!(check("Ada", "alpha"));
    assert!(!check("Ada1", "alpha"));
    assert!(!check("Ada Lovelace", "alpha"));
    assert!(!check("", "alpha"));
}

#[test]
fn test_alphanum() {
    assert!(check("abc123", "alphanum"));
    assert!(check(123, "alphanum"));
    assert!(!check("abc-123", "alphanum"));
    assert!(!check(Value::Null, "alphanum"));
}

#[test]
fn test_email() {
    assert!(check("ada@example.com", "email"));
    assert!(check("Ada.Lovelace+notes@Example.CO.uk", "email"));
    assert!(check("josé@exämple.com", "email"));
    assert!(!check("ada", "email"));
    assert!(!check("ada@", "email"));
    assert!(!check("ada@localhost", "email"));
    assert!(!check("ada lovelace@example.com", "email"));
    assert!(!check("", "email"));
}

// ============================================================================
// Lookup and configuration errors
// ============================================================================

#[test]
fn test_builtin_lookup() {
    for builtin in Builtin::ALL {
        assert_eq!(Builtin::lookup(builtin.name()), Some(builtin));
    }
    assert_eq!(Builtin::lookup("bogus"), None);
}

#[test]
fn test_empty_rule_is_an_error() {
    let err = validate_rule(&Value::from("x"), "").unwrap_err();
    assert!(matches!(err, FormError::EmptyRule));
    assert_eq!(err.to_string(), "Not passed a validation to test");
}

#[test]
fn test_unknown_rule_is_an_error() {
    let err = validate_rule(&Value::from("x"), "bogus").unwrap_err();
    assert!(matches!(err, FormError::UnknownValidator { ref name } if name == "bogus"));
    assert_eq!(err.to_string(), "Validator does not exist: bogus");
}

#[test]
fn test_matches_outside_a_form() {
    let err = validate_rule(&Value::from("x"), "matches:pass1").unwrap_err();
    assert!(matches!(err, FormError::UnknownField { ref field } if field == "pass1"));

    let err = validate_rule(&Value::from("x"), "matches").unwrap_err();
    assert!(matches!(err, FormError::MissingArgument { ref rule } if rule == "matches"));
}
