use super::*;

pub const DEFAULT_CONTAINER_SELECTOR: &str = "[data-form-validation]";
pub const DEFAULT_SUBMIT_SELECTOR: &str = "input[type=submit]";
pub const ERROR_MESSAGE_CLASS: &str = "error-msg";

#[derive(Debug, Clone)]
pub struct ValidationOptions {
    pub(crate) container_selector: String,
    pub(crate) submit_selector: String,
    pub(crate) custom_rules: Vec<CustomRule>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_string(),
            submit_selector: DEFAULT_SUBMIT_SELECTOR.to_string(),
            custom_rules: Vec::new(),
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container_selector(mut self, selector: impl Into<String>) -> Self {
        self.container_selector = selector.into();
        self
    }

    pub fn submit_selector(mut self, selector: impl Into<String>) -> Self {
        self.submit_selector = selector.into();
        self
    }

    pub fn custom_rule(
        mut self,
        id: impl Into<String>,
        message: impl Into<String>,
        check: impl Fn(&str) -> bool + 'static,
    ) -> Self {
        self.custom_rules.push(CustomRule::new(id, message, check));
        self
    }

    pub fn with_rule(mut self, rule: CustomRule) -> Self {
        self.custom_rules.push(rule);
        self
    }

    pub fn custom_rules(&self) -> &[CustomRule] {
        &self.custom_rules
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Enabled,
    Disabled,
}

impl SubmitState {
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

impl fmt::Display for SubmitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => f.write_str("enabled"),
            Self::Disabled => f.write_str("disabled"),
        }
    }
}

/// A tracked input and the registry indices of the rules it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<N> {
    node: N,
    rules: Vec<usize>,
}

impl<N: Copy> Field<N> {
    pub fn node(&self) -> N {
        self.node
    }

    pub fn rule_indices(&self) -> &[usize] {
        &self.rules
    }
}

/// One commit-trigger subscription: evaluate `rule` when `node` loses focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<N> {
    pub node: N,
    pub rule: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord<N> {
    rule_id: String,
    field: N,
    element_id: String,
    message: String,
}

impl<N: Copy> ErrorRecord<N> {
    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    pub fn field(&self) -> N {
        self.field
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Active errors keyed by rule identifier. At most one record per rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSet<N> {
    records: BTreeMap<String, ErrorRecord<N>>,
}

impl<N> Default for ErrorSet<N> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }
}

impl<N> ErrorSet<N> {
    pub fn get(&self, rule_id: &str) -> Option<&ErrorRecord<N>> {
        self.records.get(rule_id)
    }

    pub fn contains(&self, rule_id: &str) -> bool {
        self.records.contains_key(rule_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorRecord<N>> {
        self.records.values()
    }

    fn insert(&mut self, record: ErrorRecord<N>) {
        self.records.insert(record.rule_id.clone(), record);
    }

    fn remove(&mut self, rule_id: &str) -> Option<ErrorRecord<N>> {
        self.records.remove(rule_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Failed with no active record; a record and its message were created.
    Created,
    /// Failed while a record for the rule was already active; nothing changed.
    AlreadyActive,
    /// Passed and cleared the active record. `element_found` is `false` when
    /// the message element had already left the document.
    Cleared { element_found: bool },
    /// Passed with no active record.
    Passed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub rule_id: String,
    pub outcome: Outcome,
    pub submit_state: SubmitState,
}

#[derive(Debug, Clone)]
pub struct Validator<N> {
    container: N,
    submit: N,
    registry: RuleRegistry,
    fields: Vec<Field<N>>,
    bindings: Vec<Binding<N>>,
    errors: ErrorSet<N>,
    submit_state: SubmitState,
}

impl<N: Copy + Eq + fmt::Debug> Validator<N> {
    /// Resolves the container and submit control, discovers fields, binds
    /// their rules and disables the submit control.
    pub fn attach<H>(host: &mut H, options: &ValidationOptions) -> Result<Self>
    where
        H: FormHost<Node = N>,
    {
        let registry = RuleRegistry::with_custom(&options.custom_rules)?;
        let container = host
            .query(&options.container_selector)?
            .ok_or_else(|| Error::ContainerNotFound(options.container_selector.clone()))?;
        let submit = host
            .query_within(container, &options.submit_selector)?
            .ok_or_else(|| Error::SubmitControlNotFound(options.submit_selector.clone()))?;

        let fields = Self::discover(host, container, &registry);
        let bindings = fields
            .iter()
            .flat_map(|field| {
                field.rules.iter().map(|rule| Binding {
                    node: field.node,
                    rule: *rule,
                })
            })
            .collect();

        host.set_disabled(submit, true)?;

        Ok(Self {
            container,
            submit,
            registry,
            fields,
            bindings,
            errors: ErrorSet::default(),
            submit_state: SubmitState::Disabled,
        })
    }

    /// Inputs under `container` that declare at least one registered rule, in
    /// document order. Inputs without a rule attribute are never tracked.
    pub fn discover<H>(host: &H, container: N, registry: &RuleRegistry) -> Vec<Field<N>>
    where
        H: FormHost<Node = N>,
    {
        let mut fields = Vec::new();
        for node in host.inputs_within(container) {
            let rules = registry
                .iter()
                .enumerate()
                .filter(|(_, rule)| host.has_attribute(node, &rule.attribute_name()))
                .map(|(index, _)| index)
                .collect::<Vec<_>>();
            if !rules.is_empty() {
                fields.push(Field { node, rules });
            }
        }
        fields
    }

    /// Runs one bound rule against the field's current value and reconciles
    /// the error set, the rendered message and the submit control.
    pub fn evaluate<H>(&mut self, host: &mut H, binding: Binding<N>) -> Result<Evaluation>
    where
        H: FormHost<Node = N>,
    {
        if !self.bindings.contains(&binding) {
            return Err(Error::InvalidRule(format!(
                "binding {:?} -> rule index {} was not produced by field discovery",
                binding.node, binding.rule
            )));
        }
        let rule = self
            .registry
            .get(binding.rule)
            .ok_or_else(|| Error::InvalidRule(format!("unknown rule index {}", binding.rule)))?;
        let rule_id = rule.id().to_string();
        let value = host.value(binding.node)?;

        let outcome = if !rule.check(&value) {
            if self.errors.contains(&rule_id) {
                Outcome::AlreadyActive
            } else {
                let record = ErrorRecord {
                    rule_id: rule_id.clone(),
                    field: binding.node,
                    element_id: rule.error_element_id(),
                    message: rule.message().to_string(),
                };
                // A record exists only once its message is on the page.
                self.show_message(host, &record)?;
                self.errors.insert(record);
                Outcome::Created
            }
        } else if self.errors.contains(&rule_id) {
            let element_found = self.remove_message(host, &rule_id)?;
            Outcome::Cleared { element_found }
        } else {
            Outcome::Passed
        };

        let submit_state = self.recompute_submit(host)?;
        Ok(Evaluation {
            rule_id,
            outcome,
            submit_state,
        })
    }

    // Rendering is keyed off the error set alone; an existing element with the
    // same id is not consulted.
    fn show_message<H>(&self, host: &mut H, record: &ErrorRecord<N>) -> Result<()>
    where
        H: FormHost<Node = N>,
    {
        host.insert_message_before(
            record.field,
            ErrorMessage {
                id: &record.element_id,
                class_name: ERROR_MESSAGE_CLASS,
                text: &record.message,
            },
        )
    }

    fn remove_message<H>(&mut self, host: &mut H, rule_id: &str) -> Result<bool>
    where
        H: FormHost<Node = N>,
    {
        let Some(record) = self.errors.get(rule_id) else {
            return Ok(false);
        };
        let found = host.remove_message(&record.element_id)?;
        self.errors.remove(rule_id);
        Ok(found)
    }

    /// Enabled iff no error is active and every tracked field holds a
    /// non-empty value. Re-scans all fields on each call.
    pub fn recompute_submit<H>(&mut self, host: &mut H) -> Result<SubmitState>
    where
        H: FormHost<Node = N>,
    {
        let state = if self.is_valid(host)? {
            SubmitState::Enabled
        } else {
            SubmitState::Disabled
        };
        host.set_disabled(self.submit, !state.is_enabled())?;
        self.submit_state = state;
        Ok(state)
    }

    /// Live validity without touching the submit control.
    pub fn is_valid<H>(&self, host: &H) -> Result<bool>
    where
        H: FormHost<Node = N>,
    {
        if !self.errors.is_empty() {
            return Ok(false);
        }
        for field in &self.fields {
            if host.value(field.node)?.is_empty() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn container(&self) -> N {
        self.container
    }

    pub fn submit_control(&self) -> N {
        self.submit
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn fields(&self) -> &[Field<N>] {
        &self.fields
    }

    pub fn bindings(&self) -> &[Binding<N>] {
        &self.bindings
    }

    pub fn errors(&self) -> &ErrorSet<N> {
        &self.errors
    }

    pub fn error(&self, rule_id: &str) -> Option<&ErrorRecord<N>> {
        self.errors.get(rule_id)
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit_state
    }

    pub fn rule(&self, binding: Binding<N>) -> Option<&RuleDefinition> {
        self.registry.get(binding.rule)
    }
}
