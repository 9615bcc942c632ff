use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ANONYMOUS_USER_ID: &str = "anonymous";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const TIMESTAMP_FRACTION_FORMAT: &str = "%.6f";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Workout fields exactly as the client sent them.
///
/// Every field is optional and loosely typed here; [`normalize_submission`] is
/// the single place where they are checked and converted.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSubmission {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub exercise: Option<Value>,
    #[serde(default)]
    pub sets: Option<Value>,
    #[serde(default)]
    pub reps: Option<Value>,
    #[serde(default)]
    pub weight: Option<Value>,
    #[serde(default)]
    pub notes: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
    pub user_id: String,
    pub exercise: String,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub notes: String,
    pub timestamp: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Exercise name is required")]
    MissingExercise,
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl SubmissionError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Only a missing exercise is reported back to the caller as a bad request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::MissingExercise)
    }
}

pub fn parse_submission(body: Value) -> Result<WorkoutSubmission, SubmissionError> {
    if !body.is_object() {
        return Err(SubmissionError::NotAnObject);
    }
    serde_json::from_value(body)
        .map_err(|error| SubmissionError::invalid("body", error.to_string()))
}

/// Validates a submission and builds the record stamped with `recorded_at`.
///
/// The exercise check runs before any numeric conversion, so a body without an
/// exercise is rejected even when its other fields are malformed.
pub fn normalize_submission(
    submission: &WorkoutSubmission,
    recorded_at: DateTime<Utc>,
) -> Result<WorkoutEntry, SubmissionError> {
    let exercise = required_exercise(submission.exercise.as_ref())?;
    let user_id = optional_text("userId", submission.user_id.as_ref())?
        .unwrap_or_else(|| ANONYMOUS_USER_ID.to_string());
    let sets = optional_count("sets", submission.sets.as_ref())?;
    let reps = optional_count("reps", submission.reps.as_ref())?;
    let weight = optional_weight(submission.weight.as_ref())?;
    let notes = optional_text("notes", submission.notes.as_ref())?.unwrap_or_default();

    Ok(WorkoutEntry {
        user_id,
        exercise,
        sets,
        reps,
        weight,
        notes,
        timestamp: format_timestamp(&recorded_at),
        date: recorded_at.format(DATE_FORMAT).to_string(),
        time: recorded_at.format(TIME_FORMAT).to_string(),
    })
}

/// ISO-8601 without offset; the microsecond fraction is left out when it is zero.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    let seconds = at.format(TIMESTAMP_FORMAT);
    if at.timestamp_subsec_micros() == 0 {
        seconds.to_string()
    } else {
        format!("{seconds}{}", at.format(TIMESTAMP_FRACTION_FORMAT))
    }
}

/// Null, false, zero and empty strings, arrays or objects all count as absent.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Bool(true) => false,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn required_exercise(value: Option<&Value>) -> Result<String, SubmissionError> {
    match value {
        None => Err(SubmissionError::MissingExercise),
        Some(value) if is_blank(value) => Err(SubmissionError::MissingExercise),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(SubmissionError::invalid(
            "exercise",
            format!("expected a string, got {}", json_kind(other)),
        )),
    }
}

fn optional_text(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<String>, SubmissionError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(SubmissionError::invalid(
            field,
            format!("expected a string, got {}", json_kind(other)),
        )),
    }
}

// Blank values are stored as null; `true` counts as 1.
fn optional_count(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<i64>, SubmissionError> {
    let Some(value) = value.filter(|value| !is_blank(value)) else {
        return Ok(None);
    };

    match value {
        Value::Bool(_) => Ok(Some(1)),
        Value::Number(number) => {
            if let Some(whole) = number.as_i64() {
                return Ok(Some(whole));
            }
            let out_of_range =
                || SubmissionError::invalid(field, format!("{number} is out of range"));
            let float = number.as_f64().ok_or_else(out_of_range)?;
            let truncated = float.trunc();
            if !truncated.is_finite() || truncated.abs() >= i64::MAX as f64 {
                return Err(out_of_range());
            }
            Ok(Some(truncated as i64))
        }
        Value::String(text) => text.trim().parse::<i64>().map(Some).map_err(|_| {
            SubmissionError::invalid(field, format!("{text:?} is not an integer"))
        }),
        other => Err(SubmissionError::invalid(
            field,
            format!("expected an integer, got {}", json_kind(other)),
        )),
    }
}

fn optional_weight(value: Option<&Value>) -> Result<Option<f64>, SubmissionError> {
    let Some(value) = value.filter(|value| !is_blank(value)) else {
        return Ok(None);
    };

    let parsed = match value {
        Value::Bool(_) => 1.0,
        Value::Number(number) => number.as_f64().ok_or_else(|| {
            SubmissionError::invalid("weight", format!("{number} is out of range"))
        })?,
        Value::String(text) => text.trim().parse::<f64>().map_err(|_| {
            SubmissionError::invalid("weight", format!("{text:?} is not a number"))
        })?,
        other => {
            return Err(SubmissionError::invalid(
                "weight",
                format!("expected a number, got {}", json_kind(other)),
            ))
        }
    };

    if !parsed.is_finite() {
        return Err(SubmissionError::invalid("weight", "value must be finite"));
    }
    Ok(Some(parsed))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
