//! Intermediate representation of the client validation routine.
//!
//! The compiler lowers item rules into a flat list of [`RuleCheck`]s. Nothing
//! here knows script syntax; [`ScriptEmitter`](super::emit::ScriptEmitter)
//! turns the list into text.

use crate::item::RuleKind;

/// What a single check tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckKind {
    /// Value length must not exceed the limit.
    MaxLength(usize),
    /// Value length must not be below the limit.
    MinLength(usize),
    /// Value must be non-empty.
    Required,
    /// At least one of the listed option controls must be checked.
    ChoiceRequired(Vec<String>),
    /// Value must equal the literal exactly.
    Equals(String),
    /// Value must equal the live value of the element with this id.
    Match(String),
    /// Value must be empty or match the shared pattern of this kind.
    Pattern(RuleKind),
    /// The character at `position` must equal `expected`.
    CaptchaChar {
        /// Zero-based position in the submitted text.
        position: usize,
        /// The expected character.
        expected: char,
    },
}

/// Where a failing check shows its error, and whether it stops the routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorTarget {
    /// Flag this container and abort the submission.
    Container(String),
    /// Flag the checked element itself and keep evaluating.
    Element(String),
}

impl ErrorTarget {
    /// Returns the id of the element that receives the error class.
    pub fn id(&self) -> &str {
        match self {
            Self::Container(id) | Self::Element(id) => id,
        }
    }

    /// Returns `true` if a failure stops the remaining checks.
    pub const fn aborts(&self) -> bool {
        matches!(self, Self::Container(_))
    }
}

/// One guarded check of the routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCheck {
    /// Id of the element whose value is read.
    pub field_id: String,
    /// Name used in the failure message.
    pub display_name: String,
    /// What is tested.
    pub kind: CheckKind,
    /// Where the failure is shown.
    pub target: ErrorTarget,
}

/// The compiled routine: checks in evaluation order plus the ids of fields to
/// upgrade to rich-text editors after the page loads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientProgram {
    /// Checks in the order they run.
    pub checks: Vec<RuleCheck>,
    /// Editor field ids in item order.
    pub editors: Vec<String>,
}

impl ClientProgram {
    /// Returns the checks that read the given element.
    pub fn checks_for<'a>(&'a self, field_id: &'a str) -> impl Iterator<Item = &'a RuleCheck> + 'a {
        self.checks.iter().filter(move |check| check.field_id == field_id)
    }
}
