// ABOUTME: Error taxonomy groups and domain errors for employees, employments and settings
// ABOUTME: Each group owns a tag prefix; every code is registered once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use super::registry::{ErrorCodeRegistry, RegistryError};
use super::{AppError, ErrorCode};

/// A named family of error codes sharing one prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorGroup {
    /// Prefix, including the trailing dot
    pub tag: &'static str,
    /// Code suffixes appended to `tag`
    pub codes: &'static [&'static str],
}

impl ErrorGroup {
    /// Fully-qualified codes of this group
    pub fn qualified_codes(&self) -> impl Iterator<Item = String> + '_ {
        self.codes.iter().map(move |suffix| format!("{}{suffix}", self.tag))
    }
}

/// Employee record errors
pub const EMPLOYEE: ErrorGroup = ErrorGroup {
    tag: "EMP.",
    codes: &["01", "02", "03"],
};

/// Employment record errors
pub const EMPLOYMENT: ErrorGroup = ErrorGroup {
    tag: "EMT.",
    codes: &["01", "02", "03"],
};

/// Settings resolution errors
pub const SETTINGS: ErrorGroup = ErrorGroup {
    tag: "CFG.",
    codes: &["01", "02", "03", "04", "05", "06"],
};

/// Every group known to the application
pub const ALL_GROUPS: [ErrorGroup; 3] = [EMPLOYEE, EMPLOYMENT, SETTINGS];

/// Register one group's tag followed by each of its codes
///
/// # Errors
///
/// Returns the first [`RegistryError`] hit; a duplicate means two groups collide
pub fn register_group(registry: &ErrorCodeRegistry, group: &ErrorGroup) -> Result<(), RegistryError> {
    registry.register_tag(group.tag)?;
    for code in group.qualified_codes() {
        registry.register_code(&code)?;
    }
    Ok(())
}

/// Register every application error group
///
/// # Errors
///
/// Returns a [`RegistryError`] if any tag or code is already registered
pub fn register_all(registry: &ErrorCodeRegistry) -> Result<(), RegistryError> {
    for group in &ALL_GROUPS {
        register_group(registry, group)?;
    }
    info!(entries = registry.len(), "Error taxonomy registered");
    Ok(())
}

/// Errors raised while handling employee records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmployeeError {
    /// No employee with this id
    #[error("Employee not found. Employee Id: {employee_id}")]
    NotFound {
        /// Requested employee id
        employee_id: i64,
    },
    /// Email address is not well formed
    #[error("Invalid email address: '{email}'")]
    InvalidEmail {
        /// Rejected address
        email: String,
    },
    /// Name is blank or too long
    #[error("Invalid name: '{name}'. {reason}")]
    InvalidName {
        /// Rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },
}

impl EmployeeError {
    /// Fully-qualified error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "EMP.01",
            Self::InvalidEmail { .. } => "EMP.02",
            Self::InvalidName { .. } => "EMP.03",
        }
    }
}

impl From<EmployeeError> for AppError {
    fn from(error: EmployeeError) -> Self {
        match error {
            EmployeeError::NotFound { employee_id } => {
                Self::not_found(format!("{} Employee {employee_id}", error.code()))
            }
            EmployeeError::InvalidEmail { .. } | EmployeeError::InvalidName { .. } => {
                Self::invalid_input(format!("{} {error}", error.code()))
            }
        }
    }
}

/// Errors raised while handling employment records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmploymentError {
    /// No employment with this id
    #[error("Employment not found. Employment Id: {employment_id}")]
    NotFound {
        /// Requested employment id
        employment_id: i64,
    },
    /// End date precedes start date
    #[error("Employment end date ({end}) cannot be before start date ({start})")]
    PeriodDatesRange {
        /// Period start
        start: NaiveDate,
        /// Offending end date
        end: NaiveDate,
    },
    /// Probation ends after the employment period
    #[error("Probation end date ({probation_end}) cannot be after the employment end date ({end})")]
    ProbationDatesRange {
        /// Offending probation end date
        probation_end: NaiveDate,
        /// Period end
        end: NaiveDate,
    },
}

impl EmploymentError {
    /// Fully-qualified error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "EMT.01",
            Self::PeriodDatesRange { .. } => "EMT.02",
            Self::ProbationDatesRange { .. } => "EMT.03",
        }
    }
}

impl From<EmploymentError> for AppError {
    fn from(error: EmploymentError) -> Self {
        match error {
            EmploymentError::NotFound { employment_id } => {
                Self::not_found(format!("{} Employment {employment_id}", error.code()))
            }
            EmploymentError::PeriodDatesRange { .. }
            | EmploymentError::ProbationDatesRange { .. } => Self::new(
                ErrorCode::ValueOutOfRange,
                format!("{} {error}", error.code()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all_once() {
        let registry = ErrorCodeRegistry::new();
        register_all(&registry).unwrap();

        // 3 tags + 12 codes
        assert_eq!(registry.len(), 15);
        assert!(registry.contains("EMP."));
        assert!(registry.contains("CFG.06"));
    }

    #[test]
    fn test_register_all_twice_fails() {
        let registry = ErrorCodeRegistry::new();
        register_all(&registry).unwrap();

        assert_eq!(
            register_all(&registry),
            Err(RegistryError::DuplicateTag("EMP.".to_owned()))
        );
    }

    #[test]
    fn test_colliding_group_tag_rejected() {
        let registry = ErrorCodeRegistry::new();
        register_group(&registry, &EMPLOYEE).unwrap();

        let impostor = ErrorGroup {
            tag: "EMP.",
            codes: &["99"],
        };
        assert_eq!(
            register_group(&registry, &impostor),
            Err(RegistryError::DuplicateTag("EMP.".to_owned()))
        );
    }

    #[test]
    fn test_domain_codes_belong_to_their_group() {
        let employee_codes: Vec<String> = EMPLOYEE.qualified_codes().collect();
        for error in [
            EmployeeError::NotFound { employee_id: 1 },
            EmployeeError::InvalidEmail {
                email: "x".to_owned(),
            },
            EmployeeError::InvalidName {
                name: String::new(),
                reason: "blank".to_owned(),
            },
        ] {
            assert!(employee_codes.iter().any(|code| code == error.code()));
        }

        let employment_codes: Vec<String> = EMPLOYMENT.qualified_codes().collect();
        assert!(employment_codes
            .iter()
            .any(|code| code == EmploymentError::NotFound { employment_id: 1 }.code()));
    }

    #[test]
    fn test_employment_error_maps_to_app_error() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let error: AppError = EmploymentError::PeriodDatesRange { start, end }.into();

        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
        assert!(error.message.starts_with("EMT.02"));
    }

    #[test]
    fn test_not_found_errors_map_to_resource_not_found() {
        let error: AppError = EmployeeError::NotFound { employee_id: 42 }.into();
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert_eq!(error.message, "EMP.01 Employee 42 not found");

        let error: AppError = EmploymentError::NotFound { employment_id: 7 }.into();
        assert_eq!(error.http_status(), 404);
        assert_eq!(error.message, "EMT.01 Employment 7 not found");
    }
}
