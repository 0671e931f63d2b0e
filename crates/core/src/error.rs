// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slotbook_domain::DomainError;

/// Failures reported by an [`AvailabilityRepository`](crate::AvailabilityRepository).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The store could not be reached or a read failed.
    Unavailable(String),
    /// A multi-row write was rolled back.
    TransactionAborted(String),
    /// A write collided with a uniqueness or overlap guard.
    Conflict(String),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "Repository unavailable: {msg}"),
            Self::TransactionAborted(msg) => write!(f, "Transaction aborted: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Errors returned by the engine's operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A repository read or write failed.
    RepositoryUnavailable {
        /// The operation that was running.
        operation: &'static str,
        /// Underlying cause.
        message: String,
    },
    /// An atomic write was rolled back.
    TransactionAborted {
        /// The operation that was running.
        operation: &'static str,
        /// Underlying cause.
        message: String,
    },
    /// A write collided with existing data.
    Conflict {
        /// The operation that was running.
        operation: &'static str,
        /// Underlying cause.
        message: String,
    },
}

impl CoreError {
    /// Annotates a repository failure with the operation that hit it.
    #[must_use]
    pub fn from_repository(operation: &'static str, err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unavailable(message) => {
                Self::RepositoryUnavailable { operation, message }
            }
            RepositoryError::TransactionAborted(message) => {
                Self::TransactionAborted { operation, message }
            }
            RepositoryError::Conflict(message) => Self::Conflict { operation, message },
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::RepositoryUnavailable { operation, message } => {
                write!(f, "Repository unavailable during {operation}: {message}")
            }
            Self::TransactionAborted { operation, message } => {
                write!(f, "Transaction aborted during {operation}: {message}")
            }
            Self::Conflict { operation, message } => {
                write!(f, "Conflict during {operation}: {message}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
