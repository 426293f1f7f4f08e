use std::collections::{HashMap, HashSet};
use std::error::Error as StdError;
use std::fmt;

mod config;
mod dom;
mod events;
mod expand_toggle;
mod home_view;
mod html;
mod page;
mod selective_filter;
mod selector;

pub use config::ViewConfig;
pub use home_view::{DatasetIndex, previous_dpo_id, unique_dpo_ids};
pub use page::{Behavior, Page};
pub use selective_filter::{Category, DependentList, FilterState, item_matches};

use dom::{Dom, NodeId};
use events::{EventState, Listener, ListenerKind, ListenerStore};
use expand_toggle::ToggleRegistry;
use html::parse_html;
use selective_filter::FilterRegistry;
use selector::parse_selector_groups;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    InvalidConfig(String),
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
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::InvalidConfig(msg) => write!(f, "invalid view config: {msg}"),
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

// Deep markup is walked recursively; grow the stack instead of overflowing.
const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROW_BY: usize = 4 * 1024 * 1024;

fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_BY, f)
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut it = value.chars();
    let mut out = String::new();
    for _ in 0..max_chars {
        let Some(ch) = it.next() else {
            return out;
        };
        out.push(ch);
    }
    if it.next().is_some() {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests;
