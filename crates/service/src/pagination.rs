//! Pagination utilities for service layer
//!
//! `skip`/`limit` arrive as signed integers and are never rejected for sign
//! or size: negatives clamp to zero, `limit` is a count, and the end offset
//! saturates instead of overflowing.

use std::collections::HashMap;
use std::ops::Range;

use crate::errors::{FieldError, Location, ServiceError, ViolationKind};

pub const DEFAULT_SKIP: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 10;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// number of leading items to skip
    pub skip: i64,
    /// maximum number of items to return
    pub limit: i64,
}

impl Pagination {
    pub fn new(skip: i64, limit: i64) -> Self { Self { skip, limit } }

    /// Parse `skip`/`limit` out of raw query pairs; absent keys take defaults.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, ServiceError> {
        let mut errors = Vec::new();
        let skip = parse_int(params, "skip", DEFAULT_SKIP, &mut errors);
        let limit = parse_int(params, "limit", DEFAULT_LIMIT, &mut errors);
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        Ok(Self { skip, limit })
    }

    /// Clamp negatives to zero and convert to `usize`
    pub fn normalize(self) -> (usize, usize) {
        (to_count(self.skip), to_count(self.limit))
    }

    /// Index range into a sequence of `len` items.
    pub fn range(self, len: usize) -> Range<usize> {
        let (skip, limit) = self.normalize();
        let start = skip.min(len);
        let end = skip.saturating_add(limit).min(len);
        start..end
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { skip: DEFAULT_SKIP, limit: DEFAULT_LIMIT } }
}

fn to_count(v: i64) -> usize {
    usize::try_from(v.max(0)).unwrap_or(usize::MAX)
}

fn parse_int(params: &HashMap<String, String>, field: &str, default: i64, errors: &mut Vec<FieldError>) -> i64 {
    match params.get(field) {
        None => default,
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(v) => v,
            Err(_) => {
                errors.push(FieldError::new(
                    Location::Query,
                    Some(field),
                    ViolationKind::IntParsing,
                    "Input should be a valid integer, unable to parse string as an integer",
                ));
                default
            }
        },
    }
}
