use super::*;

#[test]
fn only_inputs_declaring_a_rule_are_tracked_in_document_order() -> Result<()> {
    let h = FormHarness::from_html(SIGNUP_FORM)?;
    assert_eq!(h.tracked_fields(), ["#name", "#email", "#phone"]);
    assert_eq!(h.validator().bindings().len(), 3);
    assert_eq!(h.listener_count(), 3);
    Ok(())
}

#[test]
fn data_attributes_without_a_matching_rule_do_not_track_the_input() -> Result<()> {
    let html = r#"
        <form data-form-validation>
          <input id='tooltip' data-tooltip='hello'>
          <input id='validate-other' data-validate-unknown>
          <input id='name' data-validate-name>
          <input type='submit'>
        </form>
        "#;
    let h = FormHarness::from_html(html)?;
    assert_eq!(h.tracked_fields(), ["#name"]);
    Ok(())
}

#[test]
fn select_textarea_and_outside_inputs_are_ignored() -> Result<()> {
    let html = r#"
        <input id='outside' data-validate-name>
        <form data-form-validation>
          <textarea id='bio' data-validate-name></textarea>
          <select id='country' data-validate-name><option>JP</option></select>
          <fieldset>
            <input id='nested' data-validate-email>
          </fieldset>
          <input type='submit'>
        </form>
        "#;
    let h = FormHarness::from_html(html)?;
    assert_eq!(h.tracked_fields(), ["#nested"]);
    Ok(())
}

#[test]
fn a_field_gets_one_binding_per_declared_rule_in_registry_order() -> Result<()> {
    let html = r#"
        <form data-form-validation>
          <input id='contact' data-validate-required data-validate-phone data-validate-email>
          <input type='submit'>
        </form>
        "#;
    let options =
        ValidationOptions::new().custom_rule("required", "required", |value| !value.is_empty());
    let h = FormHarness::from_html_with_options(html, &options)?;

    let rule_ids = h
        .validator()
        .bindings()
        .iter()
        .filter_map(|binding| h.validator().rule(*binding))
        .map(RuleDefinition::id)
        .collect::<Vec<_>>();
    assert_eq!(rule_ids, ["email", "phone", "required"]);
    assert_eq!(h.validator().fields().len(), 1);
    assert_eq!(h.validator().fields()[0].rule_indices(), [1, 2, 3]);
    Ok(())
}

#[test]
fn shadowing_custom_rule_binds_alongside_the_builtin() -> Result<()> {
    let html = r#"
        <form data-form-validation>
          <input id='name' data-validate-name>
          <input type='submit'>
        </form>
        "#;
    let options = ValidationOptions::new().custom_rule("name", "anything goes", |_| true);
    let h = FormHarness::from_html_with_options(html, &options)?;

    let origins = h
        .validator()
        .bindings()
        .iter()
        .filter_map(|binding| h.validator().rule(*binding))
        .map(RuleDefinition::origin)
        .collect::<Vec<_>>();
    assert_eq!(origins, [RuleOrigin::Builtin, RuleOrigin::Custom]);
    Ok(())
}

#[test]
fn custom_container_and_submit_selectors() -> Result<()> {
    let html = r#"
        <form id='first' data-form-validation>
          <input id='ignored' data-validate-name>
          <input type='submit'>
        </form>
        <form id='second'>
          <input id='picked' data-validate-name>
          <input id='go' type='submit' class='primary'>
          <input id='other' type='submit'>
        </form>
        "#;
    let options = ValidationOptions::new()
        .container_selector("#second")
        .submit_selector("input.primary");
    let h = FormHarness::from_html_with_options(html, &options)?;
    assert_eq!(h.tracked_fields(), ["#picked"]);
    assert_eq!(h.dom().label(h.validator().submit_control()), "#go");
    h.assert_submit_disabled(true)?;
    Ok(())
}

#[test]
fn missing_container_fails_fast() {
    let html = "<form><input data-validate-name><input type='submit'></form>";
    match FormHarness::from_html(html) {
        Err(Error::ContainerNotFound(selector)) => {
            assert_eq!(selector, DEFAULT_CONTAINER_SELECTOR);
        }
        other => panic!("expected missing container error, got: {other:?}"),
    }
}

#[test]
fn missing_submit_control_fails_fast() {
    let html = r#"
        <form data-form-validation>
          <input data-validate-name>
          <button type='submit'>Send</button>
        </form>
        <input type='submit'>
        "#;
    match FormHarness::from_html(html) {
        Err(Error::SubmitControlNotFound(selector)) => {
            assert_eq!(selector, DEFAULT_SUBMIT_SELECTOR);
        }
        other => panic!("expected missing submit control error, got: {other:?}"),
    }
}

#[test]
fn invalid_custom_rule_fails_construction() {
    let options = ValidationOptions::new().custom_rule("", "m", |_| true);
    let result = FormHarness::from_html_with_options(SIGNUP_FORM, &options);
    assert!(matches!(result, Err(Error::InvalidRule(_))));
}
