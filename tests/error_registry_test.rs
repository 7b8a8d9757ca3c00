// ABOUTME: Integration tests for error-code uniqueness across taxonomy groups
// ABOUTME: Verifies duplicate tags and codes are rejected and configuration codes are registered
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use employ_core::errors::taxonomy::{self, ErrorGroup, ALL_GROUPS, EMPLOYEE};
use employ_core::errors::{AppError, EmployeeError, ErrorCode, ErrorCodeRegistry, RegistryError};
use employ_server::config::ConfigError;

#[test]
fn test_second_group_claiming_tag_is_fatal() {
    let registry = ErrorCodeRegistry::new();
    let impostor = ErrorGroup {
        tag: "EMP.",
        codes: &["99"],
    };

    taxonomy::register_group(&registry, &EMPLOYEE).unwrap();
    let err = taxonomy::register_group(&registry, &impostor).unwrap_err();

    assert_eq!(err, RegistryError::DuplicateTag("EMP.".to_owned()));
    assert!(!registry.contains("EMP.99"));
}

#[test]
fn test_duplicate_code_is_rejected() {
    let registry = ErrorCodeRegistry::new();
    registry.register_code("EMT.01").unwrap();

    assert_eq!(
        registry.register_code("EMT.01"),
        Err(RegistryError::DuplicateCode("EMT.01".to_owned()))
    );
}

#[test]
fn test_all_groups_are_distinct() {
    let registry = ErrorCodeRegistry::new();
    taxonomy::register_all(&registry).unwrap();

    let expected: usize = ALL_GROUPS.iter().map(|g| 1 + g.codes.len()).sum();
    assert_eq!(registry.len(), expected);
    assert!(matches!(
        taxonomy::register_all(&registry),
        Err(RegistryError::DuplicateTag(_))
    ));
}

#[test]
fn test_configuration_codes_belong_to_registered_group() {
    let registry = ErrorCodeRegistry::new();
    taxonomy::register_all(&registry).unwrap();

    let samples = [
        ConfigError::MissingKey {
            path: "a".to_owned(),
        },
        ConfigError::InvalidValue {
            path: "a".to_owned(),
            value: "b".to_owned(),
            expected: "c".to_owned(),
        },
        ConfigError::InvalidEnum {
            path: "a".to_owned(),
            value: "b".to_owned(),
            expected: "c".to_owned(),
        },
        ConfigError::invariant("a", "b"),
        ConfigError::MissingSection("server"),
        ConfigError::Source("io".to_owned()),
    ];
    for error in samples {
        assert!(registry.contains(error.code()), "{} not registered", error.code());
    }
}

#[test]
fn test_domain_error_carries_code_into_app_error() {
    let app_error: AppError = EmployeeError::InvalidEmail {
        email: "nobody".to_owned(),
    }
    .into();

    assert_eq!(app_error.code, ErrorCode::InvalidInput);
    assert!(app_error.message.starts_with("EMP.02"));
}

#[test]
fn test_global_registry_is_shared() {
    let first = ErrorCodeRegistry::global();
    let second = ErrorCodeRegistry::global();
    assert!(std::ptr::eq(first, second));
}
