//! Reading and writing field values on bound elements.

use formdom::{Element, ElementKind, Selector};

use crate::{FieldDescriptor, Value};

/// Data key under which a bound element records its field name.
pub const FIELD_TAG: &str = "model-attribute";

/// The rendered element tree of one form, as provided by the host.
///
/// Lookups are scoped to the form: a selector resolves to at most one
/// element inside it.
pub trait RenderedTree {
    fn query(&self, selector: &Selector) -> Option<&Element>;

    fn query_mut(&mut self, selector: &Selector) -> Option<&mut Element>;

    /// Element by ID, used to resolve event targets.
    fn element(&self, id: &str) -> Option<&Element>;

    /// The form element that receives submissions: the root if it is a
    /// `<form>`, otherwise the first `<form>` inside it.
    fn form_element(&self) -> Option<&Element>;
}

impl RenderedTree for Element {
    fn query(&self, selector: &Selector) -> Option<&Element> {
        formdom::query(self, selector)
    }

    fn query_mut(&mut self, selector: &Selector) -> Option<&mut Element> {
        formdom::query_mut(self, selector)
    }

    fn element(&self, id: &str) -> Option<&Element> {
        formdom::find_element(self, id)
    }

    fn form_element(&self) -> Option<&Element> {
        if self.kind == ElementKind::Form {
            return Some(self);
        }
        let selector = Selector::parse("form").ok()?;
        formdom::query(self, &selector)
    }
}

/// Current value of a field. A missing tree or element reads as `""`.
pub(crate) fn read(tree: Option<&dyn RenderedTree>, descriptor: &FieldDescriptor) -> Value {
    match tree.and_then(|t| t.query(&descriptor.selector)) {
        Some(el) => read_element(el),
        None => {
            log::trace!("[accessor] no element for {} ({})", descriptor.name, descriptor.el);
            Value::String(String::new())
        }
    }
}

/// Write a value into a field's element and tag the element with the field
/// name. A missing element is skipped.
pub(crate) fn write(tree: &mut dyn RenderedTree, descriptor: &FieldDescriptor, value: &Value) {
    match tree.query_mut(&descriptor.selector) {
        Some(el) => {
            write_element(el, value);
            el.data.insert(FIELD_TAG.to_string(), descriptor.name.clone());
        }
        None => {
            log::trace!("[accessor] skipped write to {} ({})", descriptor.name, descriptor.el);
        }
    }
}

/// Normalized value of a single element, by element kind.
///
/// - checkbox/radio inputs: their checked state
/// - other inputs: the trimmed value
/// - textareas: their text content
/// - selects: the trimmed selected value
/// - anything else: `Null`
pub fn read_element(el: &Element) -> Value {
    match &el.kind {
        ElementKind::Input(input_type) if input_type.is_checkable() => Value::Bool(el.checked),
        ElementKind::Input(_) => Value::String(el.value.trim().to_string()),
        ElementKind::Textarea => Value::String(el.text_content()),
        ElementKind::Select => Value::String(el.selected_value().trim().to_string()),
        ElementKind::Form | ElementKind::Container(_) => Value::Null,
    }
}

/// Write a value into a single element, by element kind. Booleans set the
/// checked state of checkbox/radio inputs; everything else is written as text.
pub fn write_element(el: &mut Element, value: &Value) {
    let checkable = el.input_type().is_some_and(|t| t.is_checkable());
    match el.kind {
        ElementKind::Input(_) if checkable => match value {
            Value::Bool(checked) => el.checked = *checked,
            other => el.value = other.to_form_string(),
        },
        ElementKind::Input(_) => el.value = value.to_form_string(),
        ElementKind::Textarea => el.set_text_content(value.to_form_string()),
        ElementKind::Select => el.select_value(&value.to_form_string()),
        ElementKind::Form | ElementKind::Container(_) => {}
    }
}
