//! The form view: binding state, event routing and the submit path.

use formdom::{Element, Event, EventKind};

use crate::accessor::{self, FIELD_TAG, RenderedTree};
use crate::engine;
use crate::rules::{CustomRules, RuleContext};
use crate::{
    FieldConfig, FieldTable, FormError, FormErrorSet, FormHooks, FormSchema, Record,
    ValidationError, Value,
};

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every field passed; the submit proceeds.
    Accepted,
    /// At least one field failed; the submit event was suppressed.
    Rejected(FormErrorSet),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn errors(&self) -> Option<&FormErrorSet> {
        match self {
            Self::Accepted => None,
            Self::Rejected(errors) => Some(errors),
        }
    }
}

enum BindState<T> {
    Detached,
    Bound {
        tree: T,
        /// ID of the element that receives submissions.
        form_id: Option<String>,
    },
}

impl<T> BindState<T> {
    fn tree(&self) -> Option<&T> {
        match self {
            Self::Detached => None,
            Self::Bound { tree, .. } => Some(tree),
        }
    }

    fn tree_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Detached => None,
            Self::Bound { tree, .. } => Some(tree),
        }
    }
}

/// A data record bound to the form controls of a rendered tree.
///
/// The view starts detached. [`attach`](FormView::attach) binds it exactly
/// once: every field's record value is written into its element, then the
/// ready hook fires. From then on the host routes DOM events through
/// [`handle_event`](FormView::handle_event).
pub struct FormView<T: RenderedTree = Element> {
    fields: FieldTable,
    rules: CustomRules,
    record: Record,
    hooks: FormHooks,
    state: BindState<T>,
}

impl<T: RenderedTree> FormView<T> {
    pub fn builder() -> FormViewBuilder<T> {
        FormViewBuilder::new()
    }

    // =========================================================================
    // Binding
    // =========================================================================

    /// Bind the view to its rendered tree.
    pub fn attach(&mut self, tree: T) -> Result<(), FormError> {
        if self.is_bound() {
            return Err(FormError::AlreadyAttached);
        }

        let form_id = tree.form_element().map(|el| el.id.clone());
        if form_id.is_none() {
            log::warn!("[view] rendered tree has no form element");
        }
        self.state = BindState::Bound { tree, form_id };
        self.populate_fields();

        log::debug!("[view] bound {} field(s)", self.fields.len());
        self.hooks.ready();
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, BindState::Bound { .. })
    }

    pub fn tree(&self) -> Option<&T> {
        self.state.tree()
    }

    /// Mutable access to the bound tree, for hosts that apply user input.
    pub fn tree_mut(&mut self) -> Option<&mut T> {
        self.state.tree_mut()
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    /// Write every field's record value into its element. Missing values
    /// are written as `""`.
    fn populate_fields(&mut self) {
        let Some(tree) = self.state.tree_mut() else {
            return;
        };
        for descriptor in &self.fields {
            let value = self
                .record
                .get(&descriptor.name)
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()));
            accessor::write(tree, descriptor, &value);
        }
    }

    // =========================================================================
    // Record synchronization
    // =========================================================================

    /// Set one record value and push it into the bound element.
    /// Returns `true` if the value changed.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> bool {
        let field = field.into();
        let changed = self.record.insert(field.clone(), value);
        if changed {
            self.change_field_val(&[field]);
        }
        changed
    }

    /// Set several record values at once. Returns the names that changed.
    pub fn set_many<K, V>(&mut self, values: impl IntoIterator<Item = (K, V)>) -> Vec<String>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let changed = self.record.set_many(values);
        self.change_field_val(&changed);
        changed
    }

    /// Subscribe to record changes.
    pub fn on_change(&mut self, listener: impl FnMut(&[String]) + 'static) {
        self.record.on_change(listener);
    }

    /// Push the record values of the changed fields into their elements.
    fn change_field_val(&mut self, changed: &[String]) {
        let Some(tree) = self.state.tree_mut() else {
            return;
        };
        for name in changed {
            let Some(descriptor) = self.fields.get(name) else {
                log::trace!("[view] {} is not a declared field", name);
                continue;
            };
            let value = self.record.get(name).cloned().unwrap_or_default();
            accessor::write(tree, descriptor, &value);
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Route a DOM event from the bound tree.
    ///
    /// Submit events on the form element run the submit path and return its
    /// outcome. Field events from form controls run live validation when
    /// they match the field's trigger. Anything else is ignored.
    pub fn handle_event(&mut self, event: &mut Event) -> Result<Option<SubmitOutcome>, FormError> {
        let BindState::Bound { tree, form_id } = &self.state else {
            log::trace!("[view] {} ignored while detached", event.kind);
            return Ok(None);
        };

        if event.kind == EventKind::Submit {
            if form_id.as_deref() != Some(event.target.as_str()) {
                return Ok(None);
            }
            return self.before_submit(event).map(Some);
        }

        let Some(name) = tree
            .element(&event.target)
            .filter(|el| el.kind.is_control())
            .and_then(|el| el.data.get(FIELD_TAG))
            .cloned()
        else {
            return Ok(None);
        };
        self.on_field_event(&name, event.kind)?;
        Ok(None)
    }

    fn on_field_event(&mut self, name: &str, kind: EventKind) -> Result<(), FormError> {
        let Some(descriptor) = self.fields.get(name) else {
            return Ok(());
        };
        if !descriptor.validate_on.fires_on(kind) {
            return Ok(());
        }
        log::trace!("[view] {} on {}", kind, name);
        self.validate_field(name)?;
        Ok(())
    }

    /// Submit programmatically, through the same path as a user submit.
    pub fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        let BindState::Bound { form_id, .. } = &self.state else {
            return Err(FormError::Detached);
        };
        let mut event = Event::submit(form_id.clone().unwrap_or_default());
        self.before_submit(&mut event)
    }

    /// Validate the whole form. A rejected submit never reaches the success
    /// hook and has its default action and propagation suppressed. A
    /// configuration error suppresses the event as well.
    fn before_submit(&mut self, event: &mut Event) -> Result<SubmitOutcome, FormError> {
        let errors = match self.validate_all() {
            Ok(errors) => errors,
            Err(err) => {
                log::warn!("[view] submit aborted: {}", err);
                event.prevent_default();
                event.stop_immediate_propagation();
                return Err(err);
            }
        };

        if errors.is_empty() {
            log::debug!("[view] submit accepted");
            self.hooks.submit(event);
            return Ok(SubmitOutcome::Accepted);
        }

        log::debug!("[view] submit rejected: {} invalid field(s)", errors.len());
        event.prevent_default();
        event.stop_immediate_propagation();
        self.hooks.submit_fail(&errors);
        Ok(SubmitOutcome::Rejected(errors))
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Alias for [`validate_all`](FormView::validate_all).
    pub fn validate(&mut self) -> Result<FormErrorSet, FormError> {
        self.validate_all()
    }

    /// Validate every field in declaration order. An invalid field never
    /// stops the pass.
    pub fn validate_all(&mut self) -> Result<FormErrorSet, FormError> {
        let cx = RuleContext::new(
            &self.fields,
            &self.rules,
            &self.record,
            self.state.tree().map(|t| t as &dyn RenderedTree),
        );

        let mut errors = FormErrorSet::new();
        for descriptor in &self.fields {
            if let Some(error) = engine::validate_field(&cx, descriptor)? {
                self.hooks.validation_fail(&error);
                errors.push(error);
            }
        }
        log::debug!(
            "[view] validated {} field(s), {} invalid",
            self.fields.len(),
            errors.len()
        );
        Ok(errors)
    }

    /// Validate a single field. `Ok(None)` means the field is valid.
    pub fn validate_field(&mut self, name: &str) -> Result<Option<ValidationError>, FormError> {
        let descriptor = self
            .fields
            .get(name)
            .ok_or_else(|| FormError::unknown_field(name))?;
        let cx = RuleContext::new(
            &self.fields,
            &self.rules,
            &self.record,
            self.state.tree().map(|t| t as &dyn RenderedTree),
        );

        let result = engine::validate_field(&cx, descriptor)?;
        if let Some(error) = &result {
            self.hooks.validation_fail(error);
        }
        Ok(result)
    }

    /// Evaluate one rule spec against `value` with this form's rules and
    /// fields in scope.
    pub fn validate_rule(&self, value: &Value, rule: &str) -> Result<bool, FormError> {
        self.context().dispatch(rule, value)
    }

    /// Current element value of every field.
    pub fn serialize_form_data(&self) -> Record {
        let tree = self.state.tree().map(|t| t as &dyn RenderedTree);
        self.fields
            .iter()
            .map(|descriptor| (descriptor.name.clone(), accessor::read(tree, descriptor)))
            .collect()
    }

    fn context(&self) -> RuleContext<'_> {
        RuleContext::new(
            &self.fields,
            &self.rules,
            &self.record,
            self.state.tree().map(|t| t as &dyn RenderedTree),
        )
    }
}

impl<T: RenderedTree> std::fmt::Debug for FormView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormView")
            .field("fields", &self.fields.names().collect::<Vec<_>>())
            .field("rules", &self.rules)
            .field("record", &self.record)
            .field("hooks", &self.hooks)
            .field("bound", &self.is_bound())
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds a [`FormView`] from a schema and per-instance overrides.
///
/// Fields are merged schema first, then builder entries in call order. An
/// entry with an existing name replaces it in place.
pub struct FormViewBuilder<T: RenderedTree = Element> {
    schema: FormSchema,
    fields: Vec<(String, FieldConfig)>,
    rules: CustomRules,
    record: Option<Record>,
    data: Vec<(String, Value)>,
    hooks: FormHooks,
    tree: Option<T>,
}

impl<T: RenderedTree> Default for FormViewBuilder<T> {
    fn default() -> Self {
        Self {
            schema: FormSchema::default(),
            fields: Vec::new(),
            rules: CustomRules::default(),
            record: None,
            data: Vec::new(),
            hooks: FormHooks::default(),
            tree: None,
        }
    }
}

impl<T: RenderedTree> FormViewBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The class-level declaration shared by forms of this kind.
    pub fn schema(mut self, schema: FormSchema) -> Self {
        self.schema = schema;
        self
    }

    /// A whole instance field table.
    pub fn fields<K: Into<String>>(mut self, fields: impl IntoIterator<Item = (K, FieldConfig)>) -> Self {
        self.fields
            .extend(fields.into_iter().map(|(name, config)| (name.into(), config)));
        self
    }

    pub fn field(mut self, name: impl Into<String>, config: FieldConfig) -> Self {
        self.fields.push((name.into(), config));
        self
    }

    /// Register an instance rule. Overrides a schema rule of the same name.
    pub fn rule<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&RuleContext<'_>, &Value, &[String]) -> bool + Send + Sync + 'static,
    {
        self.rules.insert(name, rule);
        self
    }

    /// Bind an existing record instead of a fresh one.
    pub fn record(mut self, record: Record) -> Self {
        self.record = Some(record);
        self
    }

    /// Initial record values.
    pub fn data<K, V>(mut self, data: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.data
            .extend(data.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Bind to an already rendered tree at construction.
    pub fn tree(mut self, tree: T) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn on_submit(mut self, hook: impl FnMut(&Event) + 'static) -> Self {
        self.hooks.on_submit = Some(Box::new(hook));
        self
    }

    pub fn on_submit_fail(mut self, hook: impl FnMut(&FormErrorSet) + 'static) -> Self {
        self.hooks.on_submit_fail = Some(Box::new(hook));
        self
    }

    pub fn on_validation_fail(mut self, hook: impl FnMut(&ValidationError) + 'static) -> Self {
        self.hooks.on_validation_fail = Some(Box::new(hook));
        self
    }

    pub fn on_ready(mut self, hook: impl FnMut() + 'static) -> Self {
        self.hooks.on_ready = Some(Box::new(hook));
        self
    }

    pub fn build(self) -> Result<FormView<T>, FormError> {
        let FormSchema {
            defaults,
            fields: schema_fields,
            rules: schema_rules,
        } = self.schema;

        let fields = FieldTable::merge(&defaults.field, schema_fields.into_iter().chain(self.fields))?;
        let rules = schema_rules.merged(self.rules);

        let mut record = self.record.unwrap_or_default();
        record.set_many(self.data);

        log::debug!(
            "[view] built form with fields {:?} and rules {:?}",
            fields.names().collect::<Vec<_>>(),
            rules
        );

        let mut view = FormView {
            fields,
            rules,
            record,
            hooks: self.hooks,
            state: BindState::Detached,
        };
        if let Some(tree) = self.tree {
            view.attach(tree)?;
        }
        Ok(view)
    }
}
