use super::*;

#[test]
fn submit_starts_disabled_even_when_fields_are_prefilled() -> Result<()> {
    let html = r#"
        <form data-form-validation>
          <input id='name' data-validate-name value='Alice'>
          <input id='email' data-validate-email value='a@b.co'>
          <input id='send' type='submit'>
        </form>
        "#;
    let h = FormHarness::from_html(html)?;
    h.assert_submit_disabled(true)?;
    assert_eq!(h.submit_state(), SubmitState::Disabled);
    assert!(h.validator().is_valid(h.dom())?);
    Ok(())
}

#[test]
fn prefilled_form_enables_after_the_first_passing_commit() -> Result<()> {
    let html = r#"
        <form data-form-validation>
          <input id='name' data-validate-name value='Alice'>
          <input id='email' data-validate-email value='a@b.co'>
          <input id='send' type='submit'>
        </form>
        "#;
    let mut h = FormHarness::from_html(html)?;
    h.focus("#email")?;
    h.blur("#email")?;
    h.assert_submit_disabled(false)?;
    Ok(())
}

#[test]
fn submit_enables_only_once_every_tracked_field_is_filled_and_clean() -> Result<()> {
    let mut h = FormHarness::from_html(SIGNUP_FORM)?;
    h.assert_submit_disabled(true)?;

    h.commit_text("#name", "Alice")?;
    h.assert_submit_disabled(true)?;
    h.commit_text("#email", "alice@example.com")?;
    h.assert_submit_disabled(true)?;
    h.commit_text("#phone", "5551234567")?;
    h.assert_submit_disabled(false)?;
    assert_eq!(h.submit_state(), SubmitState::Enabled);
    Ok(())
}

#[test]
fn any_active_error_disables_submit_again() -> Result<()> {
    let mut h = FormHarness::from_html(SIGNUP_FORM)?;
    h.commit_text("#name", "Alice")?;
    h.commit_text("#email", "alice@example.com")?;
    h.commit_text("#phone", "5551234567")?;
    h.assert_submit_disabled(false)?;

    h.commit_text("#email", "alice")?;
    h.assert_submit_disabled(true)?;

    h.commit_text("#email", "alice@example.com")?;
    h.assert_submit_disabled(false)?;
    Ok(())
}

#[test]
fn emptying_a_field_blocks_submit_through_its_failing_rule() -> Result<()> {
    let mut h = FormHarness::from_html(SIGNUP_FORM)?;
    h.commit_text("#name", "Alice")?;
    h.commit_text("#email", "alice@example.com")?;
    h.commit_text("#phone", "5551234567")?;

    h.commit_text("#phone", "")?;
    h.assert_submit_disabled(true)?;
    h.assert_text("#phone-error", PHONE_MESSAGE)?;
    Ok(())
}

#[test]
fn untracked_fields_never_affect_submit() -> Result<()> {
    let mut h = FormHarness::from_html(SIGNUP_FORM)?;
    h.commit_text("#nickname", "")?;
    h.commit_text("#name", "Alice")?;
    h.commit_text("#email", "alice@example.com")?;
    h.commit_text("#phone", "5551234567")?;
    h.assert_submit_disabled(false)?;

    h.commit_text("#nickname", "x")?;
    h.commit_text("#nickname", "")?;
    h.assert_submit_disabled(false)?;
    Ok(())
}

#[test]
fn whitespace_counts_as_filled_for_gating() -> Result<()> {
    let html = r#"
        <form data-form-validation>
          <input id='note' data-validate-anything>
          <input type='submit'>
        </form>
        "#;
    let options = ValidationOptions::new().custom_rule("anything", "never shown", |_| true);
    let mut h = FormHarness::from_html_with_options(html, &options)?;

    h.commit_text("#note", "")?;
    h.assert_submit_disabled(true)?;

    h.commit_text("#note", "   ")?;
    h.assert_submit_disabled(false)?;
    Ok(())
}

#[test]
fn gating_rescans_fields_other_than_the_committed_one() -> Result<()> {
    let html = r#"
        <form data-form-validation>
          <input id='a' data-validate-anything>
          <input id='b' data-validate-anything>
          <input type='submit'>
        </form>
        "#;
    let options = ValidationOptions::new().custom_rule("anything", "never shown", |_| true);
    let mut h = FormHarness::from_html_with_options(html, &options)?;

    h.commit_text("#a", "filled")?;
    h.assert_submit_disabled(true)?;

    // No event fires, so the control keeps its last computed state.
    h.set_value("#b", "filled")?;
    h.assert_submit_disabled(true)?;

    h.focus("#a")?;
    h.blur("#a")?;
    h.assert_submit_disabled(false)?;
    Ok(())
}

#[test]
fn failing_commit_on_one_field_keeps_the_others_errors_in_force() -> Result<()> {
    let mut h = FormHarness::from_html(SIGNUP_FORM)?;
    h.commit_text("#name", "Al")?;
    h.commit_text("#email", "alice@example.com")?;
    h.commit_text("#phone", "5551234567")?;
    h.assert_submit_disabled(true)?;

    h.commit_text("#name", "Alice")?;
    h.assert_submit_disabled(false)?;
    Ok(())
}
