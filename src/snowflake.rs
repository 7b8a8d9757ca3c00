// ABOUTME: Snowflake-style 64-bit id generator keyed by the configured machine id
// ABOUTME: Reports its own health (machine id range, clock position relative to the epoch and last id)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Time-ordered unique ids
//!
//! Layout, most significant first: 41 bits of milliseconds since
//! [`EPOCH_MS`], 10 bits of machine id, 12 bits of per-millisecond sequence.

use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use employ_core::constants::snowflake::{
    EPOCH_MS, MACHINE_ID_BITS, MAX_MACHINE_ID, MAX_SEQUENCE, SEQUENCE_BITS,
};
use employ_core::errors::{AppError, AppResult};
use serde::Serialize;

const MACHINE_ID_SHIFT: u32 = SEQUENCE_BITS;
const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + MACHINE_ID_BITS;

#[derive(Debug, Default)]
struct GeneratorState {
    last_timestamp_ms: i64,
    sequence: u16,
}

/// Decoded parts of an id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnowflakeData {
    /// Unix timestamp in milliseconds
    pub timestamp_ms: i64,
    /// Machine that generated the id
    pub machine_id: u16,
    /// Sequence within the millisecond
    pub sequence: u16,
}

/// Health report of the id generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnowflakeCheck {
    /// Configured machine id
    pub machine_id: u16,
    /// Largest machine id the layout can hold
    pub max_machine_id: u16,
    /// Custom epoch, RFC 3339
    pub epoch: String,
    /// Timestamp of the last generated id, RFC 3339
    pub last_generated: Option<String>,
    /// Width of the sequence field
    pub sequence_bits: u32,
    /// Findings
    pub errors: Vec<String>,
}

/// Thread-safe id generator
#[derive(Debug)]
pub struct SnowflakeGenerator {
    machine_id: u16,
    state: Mutex<GeneratorState>,
}

impl SnowflakeGenerator {
    /// Create a generator for `machine_id`
    ///
    /// # Errors
    ///
    /// Returns an error if `machine_id` does not fit in the id layout
    pub fn new(machine_id: u16) -> AppResult<Self> {
        if machine_id > MAX_MACHINE_ID {
            return Err(AppError::invalid_input(format!(
                "Machine id must be between 0 and {MAX_MACHINE_ID}, got {machine_id}"
            )));
        }
        Ok(Self {
            machine_id,
            state: Mutex::new(GeneratorState::default()),
        })
    }

    /// Configured machine id
    #[must_use]
    pub const fn machine_id(&self) -> u16 {
        self.machine_id
    }

    /// Generate the next id
    ///
    /// Blocking: when the per-millisecond sequence is exhausted the calling
    /// thread sleeps, holding the generator lock, until the clock advances.
    /// Async callers on a runtime worker should go through
    /// `tokio::task::spawn_blocking`.
    ///
    /// # Errors
    ///
    /// Returns an error if the clock is before the epoch or moved backwards
    pub fn next_id(&self) -> AppResult<i64> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut now = current_millis();

        if now < EPOCH_MS {
            return Err(AppError::internal("System clock is set before the id epoch"));
        }
        if now < state.last_timestamp_ms {
            return Err(AppError::internal(format!(
                "Clock moved backwards by {}ms, refusing to generate id",
                state.last_timestamp_ms - now
            )));
        }

        if now == state.last_timestamp_ms {
            state.sequence = (state.sequence + 1) & MAX_SEQUENCE;
            if state.sequence == 0 {
                // Sequence exhausted for this millisecond
                while now <= state.last_timestamp_ms {
                    thread::sleep(Duration::from_micros(100));
                    now = current_millis();
                }
            }
        } else {
            state.sequence = 0;
        }
        state.last_timestamp_ms = now;

        Ok(((now - EPOCH_MS) << TIMESTAMP_SHIFT)
            | (i64::from(self.machine_id) << MACHINE_ID_SHIFT)
            | i64::from(state.sequence))
    }

    /// Decode an id into its parts
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn parse(id: i64) -> SnowflakeData {
        // Masked values fit their target widths
        SnowflakeData {
            timestamp_ms: (id >> TIMESTAMP_SHIFT) + EPOCH_MS,
            machine_id: ((id >> MACHINE_ID_SHIFT) & MAX_MACHINE_ID as i64) as u16,
            sequence: (id & MAX_SEQUENCE as i64) as u16,
        }
    }

    /// Evaluate the generator's health rules
    #[must_use]
    pub fn health_check(&self) -> SnowflakeCheck {
        let last_timestamp_ms = self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last_timestamp_ms;
        let now = current_millis();

        let mut errors = Vec::new();
        if self.machine_id > MAX_MACHINE_ID {
            errors.push(format!(
                "Snowflake machine id {} exceeds the maximum of {MAX_MACHINE_ID}.",
                self.machine_id
            ));
        }
        if now < EPOCH_MS {
            errors.push("System time is before the Snowflake epoch.".to_owned());
        }
        if last_timestamp_ms > now {
            errors.push(format!(
                "Last generated Snowflake id is {}ms in the future, system clock drifted backwards.",
                last_timestamp_ms - now
            ));
        }

        SnowflakeCheck {
            machine_id: self.machine_id,
            max_machine_id: MAX_MACHINE_ID,
            epoch: format_millis(EPOCH_MS).unwrap_or_default(),
            last_generated: (last_timestamp_ms > 0)
                .then(|| format_millis(last_timestamp_ms))
                .flatten(),
            sequence_bits: SEQUENCE_BITS,
            errors,
        }
    }
}

fn current_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn format_millis(millis: i64) -> Option<String> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|at: DateTime<Utc>| at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_rejects_out_of_range_machine_id() {
        assert!(SnowflakeGenerator::new(MAX_MACHINE_ID + 1).is_err());
        assert!(SnowflakeGenerator::new(MAX_MACHINE_ID).is_ok());
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let generator = SnowflakeGenerator::new(3).unwrap();
        let ids: Vec<i64> = (0..5_000).map(|_| generator.next_id().unwrap()).collect();

        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_parse_recovers_machine_id() {
        let generator = SnowflakeGenerator::new(42).unwrap();
        let before = current_millis();
        let data = SnowflakeGenerator::parse(generator.next_id().unwrap());

        assert_eq!(data.machine_id, 42);
        assert!(data.timestamp_ms >= before);
    }

    #[test]
    fn test_concurrent_generation() {
        let generator = Arc::new(SnowflakeGenerator::new(1).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = Arc::clone(&generator);
                thread::spawn(move || {
                    (0..1_000)
                        .map(|_| generator.next_id().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 4_000);
    }

    #[test]
    fn test_health_check_reports_clean_generator() {
        let generator = SnowflakeGenerator::new(9).unwrap();
        let fresh = generator.health_check();
        assert!(fresh.errors.is_empty());
        assert!(fresh.last_generated.is_none());
        assert_eq!(fresh.epoch, "2024-01-01T00:00:00.000Z");

        generator.next_id().unwrap();
        let used = generator.health_check();
        assert!(used.last_generated.is_some());
        assert_eq!(used.sequence_bits, SEQUENCE_BITS);
    }
}
