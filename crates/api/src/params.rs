// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query-string parameter parsing.
//!
//! The server extracts query parameters as raw strings so that a
//! non-numeric value surfaces as a 400 with the parameter named, rather
//! than as an extractor rejection.

use crate::error::ParamError;

/// Parses a required integer parameter.
///
/// # Errors
///
/// Returns `ParamError::Missing` if the value is absent or blank, and
/// `ParamError::NotAnInteger` if it does not parse.
pub fn required_integer(name: &'static str, raw: Option<&str>) -> Result<i64, ParamError> {
    let value: &str = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ParamError::Missing { name })?;
    value.parse::<i64>().map_err(|_| ParamError::NotAnInteger {
        name,
        value: value.to_string(),
    })
}

/// Parses an optional integer parameter. A blank value counts as absent.
///
/// # Errors
///
/// Returns `ParamError::NotAnInteger` if a present value does not parse.
pub fn optional_integer(name: &'static str, raw: Option<&str>) -> Result<Option<i64>, ParamError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ParamError::NotAnInteger {
                name,
                value: value.to_string(),
            }),
    }
}

/// Parses a required string parameter.
///
/// # Errors
///
/// Returns `ParamError::Missing` if the value is absent or blank.
pub fn required_string(name: &'static str, raw: Option<&str>) -> Result<String, ParamError> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ParamError::Missing { name })
}
