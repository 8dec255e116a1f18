use formdom::{Element, InputType};
use formview::{FieldConfig, FormError, FormSchema, FormView, Required, Trigger};

const SIGNUP: &str = r#"{
    "defaults": { "field": { "validateOn": "blur" } },
    "fields": {
        "username": {
            "el": ".username",
            "required": "Pick a username",
            "validations": { "min:3": "Too short", "alphanum": "Letters and digits only" }
        },
        "email": { "el": ".email", "required": true, "validations": { "email": "Invalid email" } },
        "pass1": { "el": ".pass1", "validateOn": "keyup" },
        "pass2": { "el": ".pass2", "required": false, "validations": { "matches:pass1": "Should match" } }
    }
}"#;

fn tree() -> Element {
    Element::form().id("signup").children(vec![
        Element::input(InputType::Text).id("username").class("username"),
        Element::input(InputType::Email).id("email").class("email"),
        Element::input(InputType::Password).id("pass1").class("pass1"),
        Element::input(InputType::Password).id("pass2").class("pass2"),
        Element::input(InputType::Text).id("invite").class("invite"),
    ])
}

// ============================================================================
// JSON schema
// ============================================================================

#[test]
fn test_schema_preserves_declaration_order() {
    let schema = FormSchema::from_json(SIGNUP).unwrap();

    let names: Vec<&str> = schema.fields.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["username", "email", "pass1", "pass2"]);

    let username = &schema.fields[0].1;
    assert_eq!(
        username.validations,
        vec![
            ("min:3".to_string(), "Too short".to_string()),
            ("alphanum".to_string(), "Letters and digits only".to_string()),
        ]
    );
}

#[test]
fn test_schema_required_forms() {
    let schema = FormSchema::from_json(SIGNUP).unwrap();
    let required: Vec<Option<Required>> = schema
        .fields
        .iter()
        .map(|(_, config)| config.required.clone())
        .collect();

    assert_eq!(
        required,
        vec![
            Some(Required::Message("Pick a username".to_string())),
            Some(Required::Default),
            None,
            None,
        ]
    );
}

#[test]
fn test_empty_required_message_is_not_required() {
    let schema = FormSchema::from_json(r#"{ "fields": { "a": { "el": ".a", "required": "" } } }"#).unwrap();
    assert_eq!(schema.fields[0].1.required, None);
}

#[test]
fn test_triggers_resolve_from_defaults() {
    let form: FormView = FormView::builder()
        .schema(FormSchema::from_json(SIGNUP).unwrap())
        .build()
        .unwrap();

    let triggers: Vec<Trigger> = form.fields().iter().map(|f| f.validate_on).collect();
    assert_eq!(
        triggers,
        vec![Trigger::Blur, Trigger::Blur, Trigger::KeyUp, Trigger::Blur]
    );
}

#[test]
fn test_trigger_defaults_to_submit() {
    let form: FormView = FormView::builder()
        .field("username", FieldConfig::new(".username"))
        .build()
        .unwrap();

    assert_eq!(form.fields().get("username").unwrap().validate_on, Trigger::Submit);
}

#[test]
fn test_unknown_trigger_is_a_config_error() {
    let err = FormSchema::from_json(r#"{ "fields": { "a": { "el": ".a", "validateOn": "hover" } } }"#)
        .unwrap_err();
    assert!(matches!(err, FormError::Config(_)));
}

#[test]
fn test_malformed_json_is_a_config_error() {
    assert!(matches!(
        FormSchema::from_json("{ \"fields\": "),
        Err(FormError::Config(_))
    ));
}

// ============================================================================
// Merging
// ============================================================================

#[test]
fn test_instance_fields_override_schema_in_place() {
    let form: FormView = FormView::builder()
        .schema(FormSchema::from_json(SIGNUP).unwrap())
        .field("invite", FieldConfig::new(".invite").validation("alphanum", "Bad code"))
        .field("email", FieldConfig::new(".email").validate_on(Trigger::Change))
        .build()
        .unwrap();

    let names: Vec<&str> = form.fields().names().collect();
    assert_eq!(names, vec!["username", "email", "pass1", "pass2", "invite"]);

    let email = form.fields().get("email").unwrap();
    assert_eq!(email.validate_on, Trigger::Change);
    assert_eq!(email.required, None);
    assert!(email.validations.is_empty());
}

#[test]
fn test_later_builder_layers_win() {
    let form: FormView = FormView::builder()
        .fields([
            ("username", FieldConfig::new(".username")),
            ("email", FieldConfig::new(".email")),
        ])
        .field("username", FieldConfig::new("#username").required())
        .build()
        .unwrap();

    let names: Vec<&str> = form.fields().names().collect();
    assert_eq!(names, vec!["username", "email"]);
    assert_eq!(form.fields().get("username").unwrap().el, "#username");
}

#[test]
fn test_schema_built_in_code() {
    let schema = FormSchema::new()
        .default_trigger(Trigger::Change)
        .field("username", FieldConfig::new(".username").required())
        .field("username", FieldConfig::new(".username").validation("min:3", "Too short"));

    assert_eq!(schema.fields.len(), 1);
    assert_eq!(schema.fields[0].1.required, None);

    let form: FormView = FormView::builder().schema(schema).build().unwrap();
    assert_eq!(form.fields().get("username").unwrap().validate_on, Trigger::Change);
}

#[test]
fn test_instance_rules_override_schema_rules() {
    let schema = FormSchema::new()
        .field("invite", FieldConfig::new(".invite").validation("inviteCode", "Bad code"))
        .rule("inviteCode", |_, _, _| false);

    let mut form = FormView::builder()
        .schema(schema.clone())
        .tree(tree())
        .build()
        .unwrap();
    assert!(form.validate_field("invite").unwrap().is_some());

    let mut form = FormView::builder()
        .schema(schema)
        .rule("inviteCode", |_, _, _| true)
        .tree(tree())
        .build()
        .unwrap();
    assert!(form.validate_field("invite").unwrap().is_none());
}

// ============================================================================
// Construction errors
// ============================================================================

#[test]
fn test_no_fields_is_an_error() {
    let err = FormView::<Element>::builder().build().unwrap_err();
    assert!(matches!(err, FormError::NoFields));
    assert_eq!(err.to_string(), "Fields must be provided");

    let empty = FormSchema::from_json(r#"{ "fields": {} }"#).unwrap();
    assert!(matches!(
        FormView::<Element>::builder().schema(empty).build(),
        Err(FormError::NoFields)
    ));
}

#[test]
fn test_invalid_selector_is_an_error() {
    let err = FormView::<Element>::builder()
        .field("username", FieldConfig::new("input[name"))
        .build()
        .unwrap_err();

    assert!(matches!(err, FormError::Selector { ref field, .. } if field == "username"));
    assert!(std::error::Error::source(&err).is_some());
}
