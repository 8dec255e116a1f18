use std::fmt;

use formdom::Event;

use crate::{FormErrorSet, ValidationError};

type SubmitHook = Box<dyn FnMut(&Event)>;
type SubmitFailHook = Box<dyn FnMut(&FormErrorSet)>;
type ValidationFailHook = Box<dyn FnMut(&ValidationError)>;
type ReadyHook = Box<dyn FnMut()>;

/// Optional callbacks invoked by a [`FormView`](crate::FormView).
///
/// An unset hook is a no-op.
#[derive(Default)]
pub struct FormHooks {
    pub on_submit: Option<SubmitHook>,
    pub on_submit_fail: Option<SubmitFailHook>,
    pub on_validation_fail: Option<ValidationFailHook>,
    pub on_ready: Option<ReadyHook>,
}

impl FormHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn submit(&mut self, event: &Event) {
        if let Some(hook) = &mut self.on_submit {
            hook(event);
        }
    }

    pub(crate) fn submit_fail(&mut self, errors: &FormErrorSet) {
        if let Some(hook) = &mut self.on_submit_fail {
            hook(errors);
        }
    }

    pub(crate) fn validation_fail(&mut self, error: &ValidationError) {
        if let Some(hook) = &mut self.on_validation_fail {
            hook(error);
        }
    }

    pub(crate) fn ready(&mut self) {
        if let Some(hook) = &mut self.on_ready {
            hook();
        }
    }
}

impl fmt::Debug for FormHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormHooks")
            .field("on_submit", &self.on_submit.is_some())
            .field("on_submit_fail", &self.on_submit_fail.is_some())
            .field("on_validation_fail", &self.on_validation_fail.is_some())
            .field("on_ready", &self.on_ready.is_some())
            .finish()
    }
}
