use std::fmt;

/// DOM event kinds the form layer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Blur,
    KeyUp,
    KeyDown,
    Change,
    Submit,
}

impl EventKind {
    /// Events fired by individual form controls.
    pub const FIELD_EVENTS: [EventKind; 4] = [
        EventKind::Blur,
        EventKind::KeyUp,
        EventKind::KeyDown,
        EventKind::Change,
    ];

    /// The DOM event name, e.g. `"keyup"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::KeyUp => "keyup",
            Self::KeyDown => "keydown",
            Self::Change => "change",
            Self::Submit => "submit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "blur" => Some(Self::Blur),
            "keyup" => Some(Self::KeyUp),
            "keydown" => Some(Self::KeyDown),
            "change" => Some(Self::Change),
            "submit" => Some(Self::Submit),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An event targeted at an element by ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: String,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    pub fn new(kind: EventKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn blur(target: impl Into<String>) -> Self {
        Self::new(EventKind::Blur, target)
    }

    pub fn key_up(target: impl Into<String>) -> Self {
        Self::new(EventKind::KeyUp, target)
    }

    pub fn key_down(target: impl Into<String>) -> Self {
        Self::new(EventKind::KeyDown, target)
    }

    pub fn change(target: impl Into<String>) -> Self {
        Self::new(EventKind::Change, target)
    }

    pub fn submit(target: impl Into<String>) -> Self {
        Self::new(EventKind::Submit, target)
    }

    /// Cancel the default action (for submit: the actual submission).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop this event from reaching any further listener.
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
