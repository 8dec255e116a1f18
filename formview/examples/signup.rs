use std::fs::File;

use formdom::{Element, Event, InputType, Selector, query_mut};
use formview::{FormSchema, FormView, SubmitOutcome};
use simplelog::{Config, LevelFilter, WriteLogger};

const SCHEMA: &str = r#"{
    "defaults": { "field": { "validateOn": "blur" } },
    "fields": {
        "username": {
            "el": ".username",
            "required": "Pick a username",
            "validations": { "min:3": "At least 3 characters", "alphanum": "Letters and digits only" }
        },
        "email": { "el": ".email", "required": true, "validations": { "email": "Invalid email" } },
        "pass1": { "el": ".pass1", "required": true, "validations": { "min:8": "At least 8 characters" } },
        "pass2": { "el": ".pass2", "validations": { "matches:pass1": "Passwords should match" } },
        "terms": { "el": ".terms", "required": "Accept the terms", "validateOn": "change" }
    }
}"#;

fn ui() -> Element {
    Element::form().id("signup").children(vec![
        Element::input(InputType::Text).id("username").class("username"),
        Element::input(InputType::Email).id("email").class("email"),
        Element::input(InputType::Password).id("pass1").class("pass1"),
        Element::input(InputType::Password).id("pass2").class("pass2"),
        Element::input(InputType::Checkbox).id("terms").class("terms"),
        Element::input(InputType::Submit).id("go").value("Sign up"),
    ])
}

/// Simulate the user typing into a control, then leaving it.
fn type_into(form: &mut FormView, id: &str, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let selector = Selector::parse(&format!("#{id}"))?;
    if let Some(el) = form.tree_mut().and_then(|tree| query_mut(tree, &selector)) {
        el.value = text.to_string();
    }
    form.handle_event(&mut Event::blur(id))?;
    Ok(())
}

fn report(outcome: &SubmitOutcome) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        SubmitOutcome::Accepted => println!("submitted"),
        SubmitOutcome::Rejected(errors) => {
            println!("rejected:\n{}", serde_json::to_string_pretty(errors)?)
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("signup.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut form = FormView::builder()
        .schema(FormSchema::from_json(SCHEMA)?)
        .data([("username", "ada")])
        .on_ready(|| println!("form ready"))
        .on_validation_fail(|error| println!("  {error}"))
        .on_submit(|event| println!("submit from #{}", event.target))
        .tree(ui())
        .build()?;

    type_into(&mut form, "email", "ada@")?;
    type_into(&mut form, "pass1", "analytical")?;
    type_into(&mut form, "pass2", "engine")?;

    let outcome = form.submit()?;
    report(&outcome)?;

    type_into(&mut form, "email", "ada@example.com")?;
    type_into(&mut form, "pass2", "analytical")?;
    form.set("terms", true);

    let mut event = Event::submit("signup");
    if let Some(outcome) = form.handle_event(&mut event)? {
        report(&outcome)?;
    }
    println!("data: {}", form.serialize_form_data().to_json()?);

    Ok(())
}
