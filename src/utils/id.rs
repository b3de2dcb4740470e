//! Parse-or-reject identifier validation.
//!
//! Every path or query identifier goes through this single helper before
//! any store lookup, so malformed input surfaces as a tagged validation
//! failure rather than an intercepted store exception.

use crate::error::AppError;
use serde_json::json;

/// Parses a record identifier, rejecting anything that is not a positive
/// integer.
pub fn parse_id(raw: &str, kind: &str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::bad_request(
            format!("Invalid {} ID format", kind),
            json!({ "id": raw }),
        )),
    }
}
