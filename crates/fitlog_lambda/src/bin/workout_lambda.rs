use std::collections::HashMap;

use aws_sdk_s3::primitives::ByteStream;
use chrono::Utc;
use fitlog_core::notification::WorkoutNotification;
use fitlog_core::storage_keys::WorkoutObject;
use fitlog_lambda::adapters::notifier::WorkoutNotifier;
use fitlog_lambda::adapters::object_store::WorkoutStore;
use fitlog_lambda::config::HandlerConfig;
use fitlog_lambda::handlers::workout::{handle_workout_event, ApiGatewayResponse};
use fitlog_lambda::logging::init_logging;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

struct S3WorkoutStore {
    bucket: String,
    s3_client: aws_sdk_s3::Client,
}

impl WorkoutStore for S3WorkoutStore {
    fn put_object(&self, object: &WorkoutObject) -> Result<(), String> {
        let bucket = self.bucket.clone();
        let object_key = object.key.clone();
        let body_bytes = object.body.clone();
        let content_type = object.content_type.clone();
        let metadata: HashMap<String, String> = object
            .metadata
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(object_key)
                    .body(ByteStream::from(body_bytes))
                    .content_type(content_type)
                    .set_metadata(Some(metadata))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to write object to s3: {error}"))
            })
        })
    }
}

struct SnsWorkoutNotifier {
    topic_arn: String,
    sns_client: aws_sdk_sns::Client,
}

impl WorkoutNotifier for SnsWorkoutNotifier {
    fn publish(&self, notification: &WorkoutNotification) -> Result<(), String> {
        let topic_arn = self.topic_arn.clone();
        let subject = notification.subject.clone();
        let message = notification.message.clone();
        let client = self.sns_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .publish()
                    .topic_arn(topic_arn)
                    .subject(subject)
                    .message(message)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to publish to sns: {error}"))
            })
        })
    }
}

struct RuntimeDependencies {
    store: S3WorkoutStore,
    notifier: SnsWorkoutNotifier,
}

async fn handle_request(
    deps: &RuntimeDependencies,
    event: LambdaEvent<Value>,
) -> Result<ApiGatewayResponse, Error> {
    let response = handle_workout_event(
        event.payload,
        Utc::now(),
        &deps.store,
        &deps.notifier,
        &mut rand::thread_rng(),
    );
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    let config = HandlerConfig::from_env().map_err(|error| Error::from(error.to_string()))?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        store: S3WorkoutStore {
            bucket: config.data_bucket.clone(),
            s3_client: aws_sdk_s3::Client::new(&aws_config),
        },
        notifier: SnsWorkoutNotifier {
            topic_arn: config.topic_arn.clone(),
            sns_client: aws_sdk_sns::Client::new(&aws_config),
        },
    };

    info!(
        component = "workout_lambda",
        event = "runtime_ready",
        data_bucket = %config.data_bucket,
        topic_arn = %config.topic_arn
    );

    lambda_runtime::run(service_fn(|event| handle_request(&deps, event))).await
}
