use super::*;

const COMMIT_EVENT: &str = "blur";

/// A parsed page with a validator attached to its form.
///
/// User actions run synchronously in call order. Only `blur` on a focused
/// field fires the commit trigger; typing and programmatic value changes leave
/// the validator's view untouched until the next commit.
#[derive(Debug)]
pub struct FormHarness {
    dom: Dom,
    validator: Validator<NodeId>,
    listeners: ListenerStore,
    active_element: Option<NodeId>,
    trace: TraceState,
}

impl FormHarness {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_options(html, &ValidationOptions::default())
    }

    pub fn from_html_with_options(html: &str, options: &ValidationOptions) -> Result<Self> {
        let mut dom = parse_html(html)?;
        let validator = Validator::attach(&mut dom, options)?;

        let mut listeners = ListenerStore::default();
        for binding in validator.bindings() {
            listeners.add(binding.node, COMMIT_EVENT, Listener { binding: *binding });
        }

        Ok(Self {
            dom,
            validator,
            listeners,
            active_element: None,
            trace: TraceState::default(),
        })
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace.take()
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace.to_stderr = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace.events = enabled;
    }

    pub fn set_trace_validation(&mut self, enabled: bool) {
        self.trace.validation = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        self.trace.set_log_limit(max_entries)
    }

    pub fn validator(&self) -> &Validator<NodeId> {
        &self.validator
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn submit_state(&self) -> SubmitState {
        self.validator.submit_state()
    }

    /// `(rule id, message)` for every active error, ordered by rule id.
    pub fn error_messages(&self) -> Vec<(String, String)> {
        self.validator
            .errors()
            .iter()
            .map(|record| (record.rule_id().to_string(), record.message().to_string()))
            .collect()
    }

    pub fn tracked_fields(&self) -> Vec<String> {
        self.validator
            .fields()
            .iter()
            .map(|field| self.dom.label(field.node()))
            .collect()
    }

    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.text_input(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }
        self.dom.set_value(target, text)?;
        self.dispatch_event(target, "input")
    }

    /// Changes the value without dispatching any event.
    pub fn set_value(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = self.text_input(selector)?;
        self.dom.set_value(target, value)
    }

    pub fn focus(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.focus_node(target)
    }

    pub fn blur(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.blur_node(target)
    }

    /// Focuses the field, types `text` and moves focus away.
    pub fn commit_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.text_input(selector)?;
        self.focus_node(target)?;
        self.type_text(selector, text)?;
        self.blur_node(target)
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn assert_not_exists(&self, selector: &str) -> Result<()> {
        if let Some(found) = self.dom.query_selector(selector)? {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: "no match".into(),
                actual: "element present".into(),
                dom_snippet: self.node_snippet(found),
            });
        }
        Ok(())
    }

    pub fn assert_submit_disabled(&self, expected: bool) -> Result<()> {
        let submit = self.validator.submit_control();
        let actual = self.dom.disabled(submit);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: self.dom.label(submit),
                expected: format!("disabled={expected}"),
                actual: format!("disabled={actual}"),
                dom_snippet: self.node_snippet(submit),
            });
        }
        Ok(())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn text_input(&self, selector: &str) -> Result<NodeId> {
        let target = self.select_one(selector)?;
        let tag = self
            .dom
            .tag_name(target)
            .ok_or_else(|| Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: "non-element".into(),
            })?
            .to_ascii_lowercase();

        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }
        Ok(target)
    }

    fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), 200)
    }

    fn focus_node(&mut self, node: NodeId) -> Result<()> {
        if self.dom.disabled(node) {
            return Ok(());
        }
        if self.active_element == Some(node) {
            return Ok(());
        }
        if let Some(current) = self.active_element {
            self.blur_node(current)?;
        }

        self.active_element = Some(node);
        self.dispatch_event(node, "focus")
    }

    fn blur_node(&mut self, node: NodeId) -> Result<()> {
        if self.active_element != Some(node) {
            return Ok(());
        }

        self.active_element = None;
        self.dispatch_event(node, COMMIT_EVENT)
    }

    fn dispatch_event(&mut self, target: NodeId, event_type: &str) -> Result<()> {
        let listeners = self.listeners.get(target, event_type);
        let label = self.dom.label(target);
        self.trace.event_line(format!(
            "[event] {event_type} target={label} listeners={}",
            listeners.len()
        ));

        for listener in listeners {
            let previous = self.validator.submit_state();
            let evaluation = self.validator.evaluate(&mut self.dom, listener.binding)?;
            self.trace_evaluation(&label, &evaluation, previous);
        }
        Ok(())
    }

    fn trace_evaluation(&mut self, label: &str, evaluation: &Evaluation, previous: SubmitState) {
        let rule_id = &evaluation.rule_id;
        let line = match evaluation.outcome {
            Outcome::Created => format!("[validate] {label} rule={rule_id} failed: error shown"),
            Outcome::AlreadyActive => {
                format!("[validate] {label} rule={rule_id} failed: error already active")
            }
            Outcome::Cleared { element_found: true } => {
                format!("[validate] {label} rule={rule_id} passed: error cleared")
            }
            Outcome::Cleared {
                element_found: false,
            } => format!(
                "[validate] {label} rule={rule_id} passed: error cleared, message element was already gone"
            ),
            Outcome::Passed => format!("[validate] {label} rule={rule_id} passed"),
        };
        self.trace.validation_line(line);

        if previous != evaluation.submit_state {
            self.trace.validation_line(format!(
                "[validate] submit {previous} -> {}",
                evaluation.submit_state
            ));
        }
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[cfg(test)]
    pub(crate) fn remove_element(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dom.remove_node(target)
    }
}
