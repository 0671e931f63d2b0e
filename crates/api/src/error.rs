// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::request_response::ViolationInfo;
use slotbook::CoreError;
use slotbook_domain::DomainError;
use slotbook_persistence::PersistenceError;
use thiserror::Error;
use tracing::error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An availability settings submission was rejected.
    ValidationFailed {
        /// Every violation found.
        violations: Vec<ViolationInfo>,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The write collided with existing data.
    Conflict {
        /// A human-readable description of the collision.
        message: String,
    },
    /// The backing store could not be reached.
    ServiceUnavailable {
        /// A description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ValidationFailed { violations } => {
                write!(
                    f,
                    "Availability settings rejected with {} violation(s)",
                    violations.len()
                )
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::ServiceUnavailable { message } => {
                write!(f, "Service unavailable: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// A query-string parameter that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// A required parameter was absent or blank.
    #[error("Missing required parameter '{name}'")]
    Missing {
        /// Parameter name as it appears on the wire.
        name: &'static str,
    },
    /// A parameter that must be an integer was not one.
    #[error("Parameter '{name}' must be an integer, got '{value}'")]
    NotAnInteger {
        /// Parameter name as it appears on the wire.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<ParamError> for ApiError {
    fn from(err: ParamError) -> Self {
        let field: &str = match &err {
            ParamError::Missing { name } | ParamError::NotAnInteger { name, .. } => name,
        };
        Self::InvalidInput {
            field: field.to_string(),
            message: err.to_string(),
        }
    }
}

fn not_found(resource_type: &str, err: &DomainError) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message: err.to_string(),
    }
}

fn invalid(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

fn rule(rule: &str, err: &DomainError) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidDateFormat { .. } => invalid("date", &err),
        DomainError::InvalidTimeFormat { .. } => invalid("time", &err),
        DomainError::InvalidTimestamp { .. } => invalid("startTime", &err),
        DomainError::UnknownTimezone(_) => invalid("timezone", &err),
        DomainError::InvalidSlotMinutes { .. } => invalid("slotMinutes", &err),
        DomainError::InvalidDuration { .. } => invalid("durationMinutes", &err),
        DomainError::InvalidInterval { .. } => invalid("endTime", &err),
        DomainError::InvalidName(_) => invalid("name", &err),
        DomainError::InvalidAppointmentStatus(_) => invalid("status", &err),
        DomainError::DateArithmeticOverflow { .. } => ApiError::Internal {
            message: err.to_string(),
        },
        DomainError::SellerNotFound(_) => not_found("Seller", &err),
        DomainError::PackageNotFound(_) => not_found("Package", &err),
        DomainError::AppointmentNotFound(_) => not_found("Appointment", &err),
        DomainError::UnavailabilityNotFound(_) => not_found("Unavailability window", &err),
        DomainError::AvailabilityNotConfigured(_) => not_found("Availability settings", &err),
        DomainError::ValidationFailed(violations) => ApiError::ValidationFailed {
            violations: violations.iter().map(ViolationInfo::from).collect(),
        },
        DomainError::SellerInactive(_) => rule("seller_active", &err),
        DomainError::OutsideWorkingHours { .. } => rule("working_hours", &err),
        DomainError::SellerUnavailable { .. } => rule("seller_unavailable", &err),
        DomainError::SlotAlreadyBooked { .. } => ApiError::Conflict {
            message: err.to_string(),
        },
        DomainError::DailyLimitReached { .. } => rule("daily_limit", &err),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::RepositoryUnavailable { .. } => ApiError::ServiceUnavailable {
            message: err.to_string(),
        },
        CoreError::TransactionAborted { .. } => ApiError::Internal {
            message: err.to_string(),
        },
        CoreError::Conflict { message, .. } => ApiError::Conflict { message },
    }
}

/// Translates a storage error raised by a registry or unavailability call.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ConstraintViolation(message) => ApiError::Conflict { message },
        PersistenceError::DatabaseConnectionFailed(_) | PersistenceError::QueryFailed(_) => {
            error!(error = %err, "Storage unavailable");
            ApiError::ServiceUnavailable {
                message: err.to_string(),
            }
        }
        _ => {
            error!(error = %err, "Storage failure");
            ApiError::Internal {
                message: err.to_string(),
            }
        }
    }
}
