use std::fmt;

use thiserror::Error;

use crate::driver::error::DriverError;

/// What an operation was trying to do when it gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Locate,
    Tap,
    EnterText,
    EditIcon,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Locate => "locate element with text like",
            Action::Tap => "tap element for text",
            Action::EnterText => "enter text into field labelled",
            Action::EditIcon => "find edit icon",
        })
    }
}

/// Caller-visible failure of a helper.
#[derive(Debug, Error)]
pub enum SmartError {
    /// Every strategy and every retry failed before the deadline
    #[error("could not {action} '{query}'{}", last_error_suffix(.last_error))]
    NotFound {
        action: Action,
        query: String,
        last_error: Option<String>,
    },

    /// A non-recoverable driver failure outside any fallback chain
    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl SmartError {
    pub fn not_found(action: Action, query: &str, last_error: Option<&DriverError>) -> Self {
        SmartError::NotFound {
            action,
            query: query.to_string(),
            last_error: last_error.map(|e| e.to_string()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SmartError::NotFound { .. })
    }

    /// The query text the failing operation was given, if any.
    pub fn query(&self) -> Option<&str> {
        match self {
            SmartError::NotFound { query, .. } => Some(query),
            SmartError::Driver(_) => None,
        }
    }
}

fn last_error_suffix(last_error: &Option<String>) -> String {
    match last_error {
        Some(e) => format!(" (last error: {})", e),
        None => String::new(),
    }
}
