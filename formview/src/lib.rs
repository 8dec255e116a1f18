//! Form binding and validation.
//!
//! A [`FormView`] binds a [`Record`] to the form controls of a rendered
//! element tree, keeps the two in sync, and validates field values against
//! declarative rules before a submission is allowed through.
//!
//! # Example
//!
//! ```
//! use formdom::{Element, InputType};
//! use formview::{FieldConfig, FormView, SubmitOutcome};
//!
//! let tree = Element::form().id("signup").children(vec![
//!     Element::input(InputType::Email).class("email"),
//!     Element::input(InputType::Password).class("pass1"),
//!     Element::input(InputType::Password).class("pass2"),
//! ]);
//!
//! let mut form = FormView::builder()
//!     .field("email", FieldConfig::new(".email").required().validation("email", "Invalid email"))
//!     .field("pass1", FieldConfig::new(".pass1"))
//!     .field("pass2", FieldConfig::new(".pass2").validation("matches:pass1", "Should match"))
//!     .data([("email", "ada@example.com"), ("pass1", "engine"), ("pass2", "engines")])
//!     .tree(tree)
//!     .build()?;
//!
//! let SubmitOutcome::Rejected(errors) = form.submit()? else {
//!     panic!("mismatched passwords must be rejected");
//! };
//! assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["pass2"]);
//!
//! form.set("pass2", "engine");
//! assert!(form.submit()?.is_accepted());
//! # Ok::<(), formview::FormError>(())
//! ```

mod accessor;
mod config;
mod descriptor;
mod engine;
mod error;
mod hooks;
mod record;
mod record_serde;
mod result;
pub mod rules;
mod value;
mod view;

pub use accessor::{FIELD_TAG, RenderedTree, read_element, write_element};
pub use config::{FieldConfig, FieldDefaults, FormDefaults, FormSchema, Required, Trigger};
pub use descriptor::{FieldDescriptor, FieldTable};
pub use error::FormError;
pub use hooks::FormHooks;
pub use record::Record;
pub use result::{FormErrorSet, ValidationError};
pub use rules::{CustomRules, RuleContext, RuleSpec, validate_rule};
pub use value::Value;
pub use view::{FormView, FormViewBuilder, SubmitOutcome};
