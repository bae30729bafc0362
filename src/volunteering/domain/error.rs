//! Error types for volunteering domain validation and parsing.

use super::{SignupId, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use thiserror::Error;

/// Coarse classification of a failed operation.
///
/// Outer layers use this to pick a response shape without matching on every
/// concrete error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced entity does not exist.
    NotFound,
    /// The request is structurally invalid (ordering, blank or oversized
    /// fields).
    InvalidInput,
    /// The request arrived after the governing deadline.
    DeadlinePassed,
    /// The store failed or a cascade could not complete.
    Storage,
}

/// The two deadlines carried by every task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeadlineKind {
    /// Last day on which a new signup may be created.
    Application,
    /// Last day on which a signup may be voluntarily withdrawn.
    Cancellation,
}

impl DeadlineKind {
    /// Returns a human-readable label for messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Application => "application deadline",
            Self::Cancellation => "cancellation deadline",
        }
    }
}

impl fmt::Display for DeadlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned while constructing or mutating volunteering domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VolunteeringDomainError {
    /// A required text field is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A text field exceeds its storage limit.
    #[error("{field} exceeds {max} characters (got {actual})")]
    FieldTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum number of characters accepted.
        max: usize,
        /// Number of characters supplied.
        actual: usize,
    },

    /// A deadline supplied at task creation lies before today.
    #[error("{kind} {deadline} is in the past (today is {today})")]
    DeadlineInPast {
        /// Which deadline was rejected.
        kind: DeadlineKind,
        /// The supplied deadline.
        deadline: NaiveDate,
        /// The date the request was evaluated on.
        today: NaiveDate,
    },

    /// A deadline supplied at task creation lies after the event date.
    #[error("{kind} {deadline} is after the event date {event_date}")]
    DeadlineAfterEvent {
        /// Which deadline was rejected.
        kind: DeadlineKind,
        /// The supplied deadline.
        deadline: NaiveDate,
        /// The event date it must not exceed.
        event_date: NaiveDate,
    },

    /// A signup was attempted after the task's application deadline.
    #[error("application deadline {deadline} for task {task_id} has passed")]
    ApplicationDeadlinePassed {
        /// Task the volunteer tried to join.
        task_id: TaskId,
        /// The deadline that has passed.
        deadline: NaiveDate,
    },

    /// A signup withdrawal was attempted after the task's cancellation
    /// deadline.
    #[error("cancellation deadline {deadline} for signup {signup_id} has passed")]
    CancellationDeadlinePassed {
        /// Signup the volunteer tried to withdraw.
        signup_id: SignupId,
        /// The deadline that has passed.
        deadline: NaiveDate,
    },

    /// A signup-date range has its bounds reversed.
    #[error("invalid signup date range: {start} is after {end}")]
    InvalidDateRange {
        /// Requested range start.
        start: DateTime<Utc>,
        /// Requested range end.
        end: DateTime<Utc>,
    },
}

impl VolunteeringDomainError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ApplicationDeadlinePassed { .. } | Self::CancellationDeadlinePassed { .. } => {
                ErrorKind::DeadlinePassed
            }
            Self::EmptyField(_)
            | Self::FieldTooLong { .. }
            | Self::DeadlineInPast { .. }
            | Self::DeadlineAfterEvent { .. }
            | Self::InvalidDateRange { .. } => ErrorKind::InvalidInput,
        }
    }
}

/// Error returned while parsing a task status from its storage form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a volunteer gender from its storage form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown gender: {0}")]
pub struct ParseGenderError(pub String);
