use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// The `type` of an `<input>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputType {
    #[default]
    Text,
    Password,
    Email,
    Number,
    Hidden,
    Checkbox,
    Radio,
    Submit,
}

impl InputType {
    /// Parse a `type` attribute value. Unknown types fall back to `Text`,
    /// as browsers do.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "password" => Self::Password,
            "email" => Self::Email,
            "number" => Self::Number,
            "hidden" => Self::Hidden,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "submit" => Self::Submit,
            _ => Self::Text,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Email => "email",
            Self::Number => "number",
            Self::Hidden => "hidden",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Submit => "submit",
        }
    }

    /// Checkbox and radio inputs carry a checked state instead of free text.
    pub fn is_checkable(&self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Form,
    Input(InputType),
    Textarea,
    Select,
    /// Any other element, identified by its tag name.
    Container(String),
}

impl ElementKind {
    pub fn tag_name(&self) -> &str {
        match self {
            Self::Form => "form",
            Self::Input(_) => "input",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Container(tag) => tag,
        }
    }

    /// Whether the element holds user-editable form state.
    pub fn is_control(&self) -> bool {
        matches!(self, Self::Input(_) | Self::Textarea | Self::Select)
    }
}

/// One `<option>` of a `<select>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,
    pub kind: ElementKind,
    pub classes: Vec<String>,
    pub attrs: HashMap<String, String>,

    // Content
    pub content: Content,

    // Form state
    pub value: String,
    pub checked: bool,
    pub options: Vec<SelectOption>,

    // Custom data storage (field tags, etc.)
    pub data: HashMap<String, String>,
}

impl Element {
    fn new(kind: ElementKind, prefix: &str) -> Self {
        Self {
            id: generate_id(prefix),
            kind,
            classes: Vec::new(),
            attrs: HashMap::new(),
            content: Content::None,
            value: String::new(),
            checked: false,
            options: Vec::new(),
            data: HashMap::new(),
        }
    }

    // Constructors

    pub fn form() -> Self {
        Self::new(ElementKind::Form, "form")
    }

    pub fn input(input_type: InputType) -> Self {
        Self::new(ElementKind::Input(input_type), "input")
    }

    pub fn textarea(text: impl Into<String>) -> Self {
        let mut el = Self::new(ElementKind::Textarea, "textarea");
        el.content = Content::Text(text.into());
        el
    }

    /// A select element. The first option is selected when none is marked.
    pub fn select(options: Vec<SelectOption>) -> Self {
        let mut el = Self::new(ElementKind::Select, "select");
        el.options = options;
        if !el.options.iter().any(|o| o.selected)
            && let Some(first) = el.options.first_mut()
        {
            first.selected = true;
        }
        el
    }

    pub fn container(tag: impl Into<String>) -> Self {
        Self::new(ElementKind::Container(tag.into()), "el")
    }

    pub fn div() -> Self {
        Self::container("div")
    }

    pub fn text(content: impl Into<String>) -> Self {
        let mut el = Self::container("span");
        el.content = Content::Text(content.into());
        el
    }

    // Builder methods

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set an attribute. `type` on an input also changes its input type.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if name == "type" && matches!(self.kind, ElementKind::Input(_)) {
            self.kind = ElementKind::Input(InputType::parse(&value));
        }
        self.attrs.insert(name, value);
        self
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.attr("name", name)
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, children: Vec<Element>) -> Self {
        self.content = Content::Children(children);
        self
    }

    // Accessors

    pub fn tag_name(&self) -> &str {
        self.kind.tag_name()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Attribute lookup including the attributes backed by dedicated fields.
    pub fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.clone()),
            "class" if !self.classes.is_empty() => Some(self.classes.join(" ")),
            "type" => match self.kind {
                ElementKind::Input(t) => Some(t.name().to_string()),
                _ => self.attrs.get(name).cloned(),
            },
            _ => self.attrs.get(name).cloned(),
        }
    }

    pub fn input_type(&self) -> Option<InputType> {
        match self.kind {
            ElementKind::Input(t) => Some(t),
            _ => None,
        }
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    pub fn child_elements_mut(&mut self) -> &mut [Element] {
        match &mut self.content {
            Content::Children(children) => children,
            _ => &mut [],
        }
    }

    pub fn text_content(&self) -> String {
        self.content.text()
    }

    pub fn set_text_content(&mut self, text: impl Into<String>) {
        self.content = Content::Text(text.into());
    }

    /// Value of the selected option, or an empty string when nothing is selected.
    pub fn selected_value(&self) -> &str {
        self.options
            .iter()
            .find(|o| o.selected)
            .map(|o| o.value.as_str())
            .unwrap_or("")
    }

    /// Select the option with the given value, deselecting the rest.
    /// When no option matches, nothing stays selected.
    pub fn select_value(&mut self, value: &str) {
        let mut matched = false;
        for option in &mut self.options {
            option.selected = option.value == value;
            matched |= option.selected;
        }
        if !matched {
            log::trace!("[select] {} has no option {:?}", self.id, value);
        }
    }
}
