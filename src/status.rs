//! Homework status validation and message formatting
//!
//! The review API response is untrusted JSON, so everything here is
//! defensive: the shape is checked level by level and each failure reports
//! exactly what was expected and where. The verdict vocabulary is fixed and
//! never mutated at runtime.

use crate::error::{Error, Result};
use serde_json::Value;

/// Returns the localized verdict text for a known status code
///
/// The vocabulary is closed: `approved`, `reviewing` and `rejected` are the
/// only statuses the review API is documented to emit. Anything else is
/// reported as [`Error::UnknownStatus`] by the formatter rather than relayed
/// to the chat.
pub fn verdict(status: &str) -> Option<&'static str> {
    match status {
        "approved" => Some("Работа проверена: ревьюеру всё понравилось. Ура!"),
        "reviewing" => Some("Работа взята на проверку ревьюером."),
        "rejected" => Some("Работа проверена: у ревьюера есть замечания."),
        _ => None,
    }
}

/// One submission's review state, extracted from a raw API record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeworkRecord {
    /// Name of the submitted homework
    pub name: String,

    /// Status code as reported by the API (not yet checked against the
    /// vocabulary)
    pub status: String,
}

impl HomeworkRecord {
    /// Extract a record from a raw JSON homework entry
    ///
    /// # Errors
    /// - [`Error::MissingField`] if `homework_name` or `status` is absent
    /// - [`Error::Shape`] if either field is present but not a string
    pub fn from_value(value: &Value) -> Result<Self> {
        let name = require_str(value, "homework_name")?;
        let status = require_str(value, "status")?;
        Ok(Self {
            name: name.to_string(),
            status: status.to_string(),
        })
    }
}

fn require_str<'a>(value: &'a Value, field: &'static str) -> Result<&'a str> {
    let field_value = value.get(field).ok_or(Error::MissingField(field))?;
    field_value.as_str().ok_or(Error::Shape {
        context: field,
        expected: "string",
    })
}

/// Check an API response against the documented shape and return its
/// homework list
///
/// An empty list is a normal result, not an error: it means no homework
/// changed inside the requested window. Ordering is preserved as received;
/// the API returns most-recent-first, so callers pick index 0.
///
/// # Errors
/// - [`Error::Shape`] if the top-level value is not an object, or if
///   `homeworks` is not an array
/// - [`Error::MissingField`] if the `homeworks` key is absent
pub fn validate_response(response: &Value) -> Result<&Vec<Value>> {
    let object = response.as_object().ok_or(Error::Shape {
        context: "response",
        expected: "object",
    })?;
    let homeworks = object
        .get("homeworks")
        .ok_or(Error::MissingField("homeworks"))?;
    homeworks.as_array().ok_or(Error::Shape {
        context: "homeworks",
        expected: "array",
    })
}

/// Render the notification message for one homework record
///
/// Pure and deterministic: a fixed template interpolating the homework name
/// and the localized verdict.
///
/// # Errors
/// Returns [`Error::UnknownStatus`] if the status is outside the verdict
/// vocabulary.
pub fn render_status(record: &HomeworkRecord) -> Result<String> {
    let verdict =
        verdict(&record.status).ok_or_else(|| Error::UnknownStatus(record.status.clone()))?;
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        record.name, verdict
    ))
}

/// Extract and render a raw homework entry in one step
///
/// # Errors
/// Fails like [`HomeworkRecord::from_value`] and [`render_status`].
pub fn parse_status(value: &Value) -> Result<String> {
    render_status(&HomeworkRecord::from_value(value)?)
}
