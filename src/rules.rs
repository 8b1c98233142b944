use super::*;
use unicode_normalization::UnicodeNormalization;

/// Caller-supplied predicate for a custom rule. Returns `true` when the value passes.
pub type CheckFn = Rc<dyn Fn(&str) -> bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BuiltinPredicate {
    MinTrimmedChars(usize),
    Pattern(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct BuiltinRule {
    pub(crate) id: &'static str,
    pub(crate) message: &'static str,
    pub(crate) predicate: BuiltinPredicate,
}

// The name message promises "letters only" but only the length is checked.
pub(crate) const BUILTIN_RULES: &[BuiltinRule] = &[
    BuiltinRule {
        id: "name",
        message: "Name must be longer than 3 characters and must be letters only",
        predicate: BuiltinPredicate::MinTrimmedChars(3),
    },
    BuiltinRule {
        id: "email",
        message: "Please enter a valid email",
        predicate: BuiltinPredicate::Pattern(r"^.+@.+\..+$"),
    },
    BuiltinRule {
        id: "phone",
        message: "Please enter a valid phone number",
        predicate: BuiltinPredicate::Pattern(r"[0-9]{10}"),
    },
];

#[derive(Clone)]
pub(crate) enum RuleCheck {
    MinTrimmedChars(usize),
    Pattern(Pattern),
    Custom(CheckFn),
}

impl RuleCheck {
    fn passes(&self, value: &str) -> bool {
        match self {
            Self::MinTrimmedChars(min) => value.trim().nfc().count() >= *min,
            Self::Pattern(pattern) => pattern.is_match(value),
            Self::Custom(check) => check(value),
        }
    }
}

impl fmt::Debug for RuleCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinTrimmedChars(min) => write!(f, "MinTrimmedChars({min})"),
            Self::Pattern(pattern) => write!(f, "Pattern({:?})", pattern.source()),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// How a custom rule decides whether a value passes.
#[derive(Clone)]
pub enum CustomCheck {
    Predicate(CheckFn),
    Pattern {
        pattern: String,
        case_insensitive: bool,
    },
}

impl fmt::Debug for CustomCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Pattern {
                pattern,
                case_insensitive,
            } => f
                .debug_struct("Pattern")
                .field("pattern", pattern)
                .field("case_insensitive", case_insensitive)
                .finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CustomRule {
    pub id: String,
    pub message: String,
    pub check: CustomCheck,
}

impl CustomRule {
    pub fn new(
        id: impl Into<String>,
        message: impl Into<String>,
        check: impl Fn(&str) -> bool + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            check: CustomCheck::Predicate(Rc::new(check)),
        }
    }

    pub fn pattern(
        id: impl Into<String>,
        message: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            check: CustomCheck::Pattern {
                pattern: pattern.into(),
                case_insensitive: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOrigin {
    Builtin,
    Custom,
}

#[derive(Debug, Clone)]
pub struct RuleDefinition {
    id: String,
    message: String,
    check: RuleCheck,
    origin: RuleOrigin,
}

impl RuleDefinition {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn origin(&self) -> RuleOrigin {
        self.origin
    }

    pub fn check(&self, value: &str) -> bool {
        self.check.passes(value)
    }

    /// Camel-cased dataset key, e.g. `validateName` or `validateZipCode`.
    pub fn dataset_key(&self) -> String {
        let mut out = String::from("validate");
        let mut upper_next = true;
        for ch in self.id.chars() {
            if ch == '-' {
                upper_next = true;
                continue;
            }
            if upper_next {
                out.push(ch.to_ascii_uppercase());
                upper_next = false;
            } else {
                out.push(ch);
            }
        }
        out
    }

    pub fn attribute_name(&self) -> String {
        dataset_key_to_attr_name(&self.dataset_key())
    }

    pub fn error_element_id(&self) -> String {
        format!("{}-error", self.id)
    }
}

/// Ordered rule lookup: built-ins first, then custom rules in the order supplied.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<RuleDefinition>,
}

impl RuleRegistry {
    pub fn builtin() -> Result<Self> {
        Self::with_custom(&[])
    }

    pub fn with_custom(custom: &[CustomRule]) -> Result<Self> {
        let mut rules = Vec::with_capacity(BUILTIN_RULES.len() + custom.len());
        for builtin in BUILTIN_RULES {
            let check = match builtin.predicate {
                BuiltinPredicate::MinTrimmedChars(min) => RuleCheck::MinTrimmedChars(min),
                BuiltinPredicate::Pattern(pattern) => RuleCheck::Pattern(Pattern::new(pattern)?),
            };
            rules.push(RuleDefinition {
                id: builtin.id.to_string(),
                message: builtin.message.to_string(),
                check,
                origin: RuleOrigin::Builtin,
            });
        }

        for rule in custom {
            validate_rule_id(&rule.id)?;
            let check = match &rule.check {
                CustomCheck::Predicate(check) => RuleCheck::Custom(Rc::clone(check)),
                CustomCheck::Pattern {
                    pattern,
                    case_insensitive,
                } => RuleCheck::Pattern(
                    PatternBuilder::new(pattern)
                        .case_insensitive(*case_insensitive)
                        .build()?,
                ),
            };
            rules.push(RuleDefinition {
                id: rule.id.clone(),
                message: rule.message.clone(),
                check,
                origin: RuleOrigin::Custom,
            });
        }

        Ok(Self { rules })
    }

    // A custom rule reusing a built-in id is never returned here; both stay bindable.
    pub fn lookup(&self, id: &str) -> Option<&RuleDefinition> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&RuleDefinition> {
        self.rules.get(index)
    }
}

fn validate_rule_id(id: &str) -> Result<()> {
    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        return Err(Error::InvalidRule("rule id must not be empty".into()));
    };
    if !first.is_ascii_alphabetic() {
        return Err(Error::InvalidRule(format!(
            "rule id must start with an ASCII letter: {id}"
        )));
    }
    if !chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_') {
        return Err(Error::InvalidRule(format!(
            "rule id may only contain ASCII letters, digits, '-' and '_': {id}"
        )));
    }
    Ok(())
}
