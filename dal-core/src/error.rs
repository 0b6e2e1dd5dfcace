use crate::Error;
use std::fmt::{self, Display};

/// Kind of failure, attached as context to the errors produced by the engines and drivers.
///
/// ```rust
/// use dal_core::{Context, Error, Failure};
/// let error = Err::<(), _>(Error::msg("empty")).context(Failure::InputShape).unwrap_err();
/// assert_eq!(Failure::of(&error), Some(Failure::InputShape));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Unusable driver or data source identity.
    Configuration,
    /// The records handed to an operation cannot be written.
    InputShape,
    /// The backend rejected the statement text.
    Statement,
    /// The backend failed while executing a statement.
    Execution,
    /// The transaction could not be committed, nothing was applied.
    Commit,
    /// A single result row could not be decoded.
    Scan,
}

impl Failure {
    pub fn of(error: &Error) -> Option<Failure> {
        error.downcast_ref::<Failure>().copied()
    }

    /// Attach `self` unless the error already carries a kind.
    pub fn attach(self, error: Error) -> Error {
        if Failure::of(&error).is_some() {
            error
        } else {
            error.context(self)
        }
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Failure::Configuration => "configuration error",
            Failure::InputShape => "invalid input",
            Failure::Statement => "statement error",
            Failure::Execution => "execution error",
            Failure::Commit => "commit error",
            Failure::Scan => "scan error",
        })
    }
}
