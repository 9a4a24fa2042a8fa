//! Shape check for the homework status API payload

use serde_json::{Map, Value};

use crate::error::ShapeError;

pub const HOMEWORKS_KEY: &str = "homeworks";
pub const CURRENT_DATE_KEY: &str = "current_date";

/// A payload that passed the shape check.
///
/// Entries are kept in server order and are not inspected yet.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusResponse {
    pub homeworks: Vec<Value>,
    pub current_date: Value,
}

impl StatusResponse {
    /// The most recent entry, assuming the server lists them chronologically
    pub fn latest(&self) -> Option<&Value> {
        self.homeworks.last()
    }

    /// The cursor for the next request, if the server sent a usable one.
    ///
    /// Zero, `null`, and anything that is not an integer yield `None`.
    pub fn next_cursor(&self) -> Option<i64> {
        self.current_date.as_i64().filter(|cursor| *cursor != 0)
    }
}

/// Check that the payload has the expected keys and types
pub fn check_response(payload: &Value) -> Result<StatusResponse, ShapeError> {
    tracing::debug!("Checking API response");
    let map: &Map<String, Value> = payload.as_object().ok_or(ShapeError::NotAMapping)?;

    let homeworks = map
        .get(HOMEWORKS_KEY)
        .ok_or(ShapeError::MissingKey(HOMEWORKS_KEY))?;
    let current_date = map
        .get(CURRENT_DATE_KEY)
        .ok_or(ShapeError::MissingKey(CURRENT_DATE_KEY))?;

    let homeworks = homeworks
        .as_array()
        .ok_or(ShapeError::WrongType(HOMEWORKS_KEY))?;

    Ok(StatusResponse {
        homeworks: homeworks.clone(),
        current_date: current_date.clone(),
    })
}
