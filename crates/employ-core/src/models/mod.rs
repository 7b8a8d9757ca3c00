// ABOUTME: Core data models shared between the API layer and persistence
// ABOUTME: Currently the validated employment period
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Employment period with start/end invariants
pub mod employment;

pub use employment::EmploymentPeriod;
