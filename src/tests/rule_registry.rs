use super::*;

#[test]
fn builtin_rules_come_in_fixed_order_with_their_messages() -> Result<()> {
    let registry = RuleRegistry::builtin()?;
    let ids = registry.iter().map(RuleDefinition::id).collect::<Vec<_>>();
    assert_eq!(ids, ["name", "email", "phone"]);

    let name = registry.lookup("name").ok_or_else(|| Error::InvalidRule("name".into()))?;
    assert_eq!(name.message(), NAME_MESSAGE);
    assert_eq!(name.origin(), RuleOrigin::Builtin);
    assert_eq!(
        registry.lookup("email").map(RuleDefinition::message),
        Some(EMAIL_MESSAGE)
    );
    assert_eq!(
        registry.lookup("phone").map(RuleDefinition::message),
        Some(PHONE_MESSAGE)
    );
    assert!(registry.lookup("zip").is_none());
    Ok(())
}

#[test]
fn name_rule_checks_trimmed_length_only() -> Result<()> {
    let registry = RuleRegistry::builtin()?;
    let name = registry.lookup("name").ok_or_else(|| Error::InvalidRule("name".into()))?;

    assert!(!name.check(""));
    assert!(!name.check("Al"));
    assert!(!name.check("   Al   "));
    assert!(name.check("Ali"));
    assert!(name.check("  Alice "));
    // Digits pass: the "letters only" wording is not enforced.
    assert!(name.check("R2D2"));
    Ok(())
}

#[test]
fn name_rule_counts_normalized_characters() -> Result<()> {
    let registry = RuleRegistry::builtin()?;
    let name = registry.lookup("name").ok_or_else(|| Error::InvalidRule("name".into()))?;

    // Two decomposed "é" are four scalar values but two characters.
    assert!(!name.check("e\u{301}e\u{301}"));
    assert!(name.check("Zoe\u{308}"));
    assert!(name.check("Zo\u{eb}"));
    Ok(())
}

#[test]
fn email_rule_requires_text_around_at_and_dot() -> Result<()> {
    let registry = RuleRegistry::builtin()?;
    let email = registry
        .lookup("email")
        .ok_or_else(|| Error::InvalidRule("email".into()))?;

    assert!(email.check("a@b.co"));
    assert!(email.check("first.last@example.org"));
    assert!(!email.check("not-an-email"));
    assert!(!email.check("@b.co"));
    assert!(!email.check("a@.co"));
    assert!(!email.check("a@b."));
    assert!(!email.check("a@bco"));
    assert!(!email.check(""));
    Ok(())
}

#[test]
fn phone_rule_looks_for_ten_consecutive_digits_anywhere() -> Result<()> {
    let registry = RuleRegistry::builtin()?;
    let phone = registry
        .lookup("phone")
        .ok_or_else(|| Error::InvalidRule("phone".into()))?;

    assert!(phone.check("5551234567"));
    assert!(phone.check("call 5551234567 today"));
    assert!(phone.check("+15551234567"));
    assert!(!phone.check("555-123-4567"));
    assert!(!phone.check("555123456"));
    assert!(!phone.check(""));
    Ok(())
}

#[test]
fn custom_rules_follow_builtins_in_insertion_order() -> Result<()> {
    let registry = RuleRegistry::with_custom(&[
        CustomRule::new("required", "required", |value| !value.is_empty()),
        CustomRule::pattern("zipCode", "Please enter a valid zip code", r"^\d{5}$"),
    ])?;

    let ids = registry.iter().map(RuleDefinition::id).collect::<Vec<_>>();
    assert_eq!(ids, ["name", "email", "phone", "required", "zipCode"]);

    let required = registry
        .lookup("required")
        .ok_or_else(|| Error::InvalidRule("required".into()))?;
    assert_eq!(required.origin(), RuleOrigin::Custom);
    assert!(!required.check(""));
    assert!(required.check("x"));

    let zip = registry
        .lookup("zipCode")
        .ok_or_else(|| Error::InvalidRule("zipCode".into()))?;
    assert!(zip.check("12345"));
    assert!(!zip.check("1234"));
    Ok(())
}

#[test]
fn rule_attribute_and_message_ids_derive_from_the_identifier() -> Result<()> {
    let registry = RuleRegistry::with_custom(&[
        CustomRule::new("zipCode", "zip", |_| true),
        CustomRule::new("post-box", "box", |_| true),
    ])?;

    let name = registry.lookup("name").ok_or_else(|| Error::InvalidRule("name".into()))?;
    assert_eq!(name.dataset_key(), "validateName");
    assert_eq!(name.attribute_name(), "data-validate-name");
    assert_eq!(name.error_element_id(), "name-error");

    let zip = registry
        .lookup("zipCode")
        .ok_or_else(|| Error::InvalidRule("zipCode".into()))?;
    assert_eq!(zip.dataset_key(), "validateZipCode");
    assert_eq!(zip.attribute_name(), "data-validate-zip-code");
    assert_eq!(zip.error_element_id(), "zipCode-error");

    let post_box = registry
        .lookup("post-box")
        .ok_or_else(|| Error::InvalidRule("post-box".into()))?;
    assert_eq!(post_box.attribute_name(), "data-validate-post-box");
    Ok(())
}

#[test]
fn custom_rule_reusing_builtin_id_is_kept_but_lookup_finds_builtin() -> Result<()> {
    let registry =
        RuleRegistry::with_custom(&[CustomRule::new("name", "anything goes", |_| true)])?;

    assert_eq!(registry.len(), 4);
    assert_eq!(
        registry.lookup("name").map(RuleDefinition::origin),
        Some(RuleOrigin::Builtin)
    );
    assert_eq!(
        registry.iter().filter(|rule| rule.id() == "name").count(),
        2
    );
    Ok(())
}

#[test]
fn malformed_custom_rules_are_rejected() {
    let empty = RuleRegistry::with_custom(&[CustomRule::new("", "m", |_| true)]);
    assert!(matches!(empty, Err(Error::InvalidRule(_))));

    let digit_first = RuleRegistry::with_custom(&[CustomRule::new("9lives", "m", |_| true)]);
    assert!(matches!(digit_first, Err(Error::InvalidRule(_))));

    let spaced = RuleRegistry::with_custom(&[CustomRule::new("zip code", "m", |_| true)]);
    assert!(matches!(spaced, Err(Error::InvalidRule(_))));

    let bad_pattern = RuleRegistry::with_custom(&[CustomRule::pattern("zip", "m", "(")]);
    match bad_pattern {
        Err(Error::Pattern { pattern, .. }) => assert_eq!(pattern, "("),
        other => panic!("expected pattern error, got: {other:?}"),
    }
}

#[test]
fn case_insensitive_custom_pattern() -> Result<()> {
    let rule = CustomRule {
        id: "code".into(),
        message: "bad code".into(),
        check: CustomCheck::Pattern {
            pattern: "^abc$".into(),
            case_insensitive: true,
        },
    };
    let registry = RuleRegistry::with_custom(&[rule])?;
    let code = registry.lookup("code").ok_or_else(|| Error::InvalidRule("code".into()))?;
    assert!(code.check("ABC"));
    assert!(code.check("abc"));
    assert!(!code.check("abcd"));
    Ok(())
}
