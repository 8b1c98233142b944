use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;

mod dom;
mod engine;
mod harness;
mod host;
mod html;
mod pattern;
mod rules;
mod runtime_state;
mod selector;

use dom::*;
use html::*;
use pattern::*;
use runtime_state::*;
#[cfg(test)]
use selector::*;

pub use dom::{Dom, NodeId};
pub use engine::{
    Binding, DEFAULT_CONTAINER_SELECTOR, DEFAULT_SUBMIT_SELECTOR, ERROR_MESSAGE_CLASS, ErrorRecord,
    ErrorSet, Evaluation, Field, Outcome, SubmitState, ValidationOptions, Validator,
};
pub use harness::FormHarness;
pub use host::{ErrorMessage, FormHost};
pub use rules::{CheckFn, CustomCheck, CustomRule, RuleDefinition, RuleOrigin, RuleRegistry};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    UnsupportedSelector(String),
    SelectorNotFound(String),
    ContainerNotFound(String),
    SubmitControlNotFound(String),
    InvalidRule(String),
    Pattern {
        pattern: String,
        message: String,
    },
    Dom(String),
    Config(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::ContainerNotFound(selector) => {
                write!(f, "form container not found: {selector}")
            }
            Self::SubmitControlNotFound(selector) => {
                write!(f, "submit control not found in container: {selector}")
            }
            Self::InvalidRule(msg) => write!(f, "invalid rule: {msg}"),
            Self::Pattern { pattern, message } => {
                write!(f, "invalid rule pattern {pattern}: {message}")
            }
            Self::Dom(msg) => write!(f, "dom error: {msg}"),
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
        }
    }
}

impl StdError for Error {}

#[cfg(test)]
mod tests;
