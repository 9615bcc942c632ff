use chrono::{DateTime, Utc};
use fitlog_core::contract::{normalize_submission, parse_submission, SubmissionError, WorkoutEntry};
use fitlog_core::notification::{choose_motivation, compose_notification};
use fitlog_core::storage_keys::workout_object;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::adapters::notifier::WorkoutNotifier;
use crate::adapters::object_store::WorkoutStore;
use crate::handlers::event::{decode_body, is_preflight, targets_path};

pub const HEALTH_CHECK_PATH: &str = "/health";
pub const CORS_ALLOWED_HEADERS: &str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";
pub const CORS_ALLOWED_METHODS: &str = "OPTIONS,POST,GET";
pub const WORKOUT_LOGGED_MESSAGE: &str = "Workout logged successfully!";
pub const WORKOUT_FAILED_MESSAGE: &str = "Failed to log workout";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutLoggedResponse {
    pub message: String,
    pub data: WorkoutEntry,
    pub motivation: String,
}

/// Every way a workout submission can fail after the request was accepted.
///
/// Only a missing exercise reaches the caller as a 400; the rest share one
/// 500 response and are told apart in the logs.
#[derive(Debug, thiserror::Error)]
pub enum WorkoutHandlerError {
    #[error("{0}")]
    MalformedBody(String),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error("failed to serialize workout record: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to store workout: {0}")]
    Storage(String),
    #[error("failed to publish notification: {0}")]
    Notification(String),
}

impl WorkoutHandlerError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedBody(_) => "malformed_body",
            Self::Submission(error) if error.is_rejection() => "validation",
            Self::Submission(_) => "invalid_field",
            Self::Serialization(_) => "serialization",
            Self::Storage(_) => "storage",
            Self::Notification(_) => "notification",
        }
    }

    fn is_rejection(&self) -> bool {
        matches!(self, Self::Submission(error) if error.is_rejection())
    }
}

pub fn handle_workout_event(
    event: Value,
    received_at: DateTime<Utc>,
    store: &impl WorkoutStore,
    notifier: &impl WorkoutNotifier,
    rng: &mut impl Rng,
) -> ApiGatewayResponse {
    debug!(component = "workout_handler", event = %event, "received event");

    if is_preflight(&event) {
        return json_response(200, &json!({"message": "CORS preflight"}));
    }

    if targets_path(&event, HEALTH_CHECK_PATH) {
        return json_response(
            200,
            &json!({"status": "healthy", "message": "Lambda is running"}),
        );
    }

    match log_workout(event, received_at, store, notifier, rng) {
        Ok(response) => json_response(200, &response),
        Err(error) if error.is_rejection() => {
            info!(
                component = "workout_handler",
                event = "workout_rejected",
                reason = %error
            );
            json_response(400, &json!({"error": error.to_string()}))
        }
        Err(error) => {
            error!(
                component = "workout_handler",
                event = "workout_failed",
                kind = error.kind(),
                error = %error
            );
            json_response(
                500,
                &json!({
                    "error": WORKOUT_FAILED_MESSAGE,
                    "details": error.to_string(),
                }),
            )
        }
    }
}

/// Persist first, then notify. A failed publish leaves the record in place.
fn log_workout(
    event: Value,
    received_at: DateTime<Utc>,
    store: &impl WorkoutStore,
    notifier: &impl WorkoutNotifier,
    rng: &mut impl Rng,
) -> Result<WorkoutLoggedResponse, WorkoutHandlerError> {
    let body = decode_body(event).map_err(WorkoutHandlerError::MalformedBody)?;
    let submission = parse_submission(body)?;
    let entry = normalize_submission(&submission, received_at)?;

    let object = workout_object(&entry, &received_at)?;
    info!(
        component = "workout_handler",
        event = "workout_storing",
        key = %object.key,
        user_id = %entry.user_id,
        exercise = %entry.exercise
    );
    store
        .put_object(&object)
        .map_err(WorkoutHandlerError::Storage)?;

    let motivation = choose_motivation(rng);
    let notification = compose_notification(&entry, motivation);
    info!(
        component = "workout_handler",
        event = "notification_publishing",
        subject = %notification.subject
    );
    notifier
        .publish(&notification)
        .map_err(WorkoutHandlerError::Notification)?;

    Ok(WorkoutLoggedResponse {
        message: WORKOUT_LOGGED_MESSAGE.to_string(),
        data: entry,
        motivation: motivation.to_string(),
    })
}

pub fn cors_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Headers": CORS_ALLOWED_HEADERS,
        "Access-Control-Allow-Methods": CORS_ALLOWED_METHODS,
    })
}

fn json_response(status_code: u16, payload: &impl Serialize) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: cors_headers(),
        body: serde_json::to_string(payload).expect("response payload should serialize"),
    }
}
