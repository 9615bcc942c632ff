use serde_json::{json, Value};

use crate::config::StackConfig;
use crate::intrinsics::{get_att, join, partition, reference};
use crate::resources::storage::objects_arn;
use crate::template::Resource;

pub const FUNCTION_RUNTIME: &str = "provided.al2023";
pub const FUNCTION_HANDLER: &str = "bootstrap";
pub const DATA_BUCKET_ENV: &str = "DATA_BUCKET_NAME";
pub const TOPIC_ARN_ENV: &str = "SNS_TOPIC_ARN";

/// Object and bucket actions needed to read and write workout records.
pub const DATA_BUCKET_ACTIONS: [&str; 10] = [
    "s3:GetObject*",
    "s3:GetBucket*",
    "s3:List*",
    "s3:DeleteObject*",
    "s3:PutObject",
    "s3:PutObjectLegalHold",
    "s3:PutObjectRetention",
    "s3:PutObjectTagging",
    "s3:PutObjectVersionTagging",
    "s3:Abort*",
];

pub fn execution_role() -> Resource {
    Resource::new(
        "AWS::IAM::Role",
        json!({
            "AssumeRolePolicyDocument": {
                "Version": "2012-10-17",
                "Statement": [{
                    "Effect": "Allow",
                    "Principal": { "Service": "lambda.amazonaws.com" },
                    "Action": "sts:AssumeRole",
                }],
            },
            "ManagedPolicyArns": [basic_execution_policy_arn()],
        }),
    )
}

/// Read/write on the data bucket and publish on the topic.
pub fn data_access_policy(role_id: &str, data_bucket_id: &str, topic_id: &str) -> Resource {
    Resource::new(
        "AWS::IAM::Policy",
        json!({
            "PolicyName": "WorkoutHandlerDataAccess",
            "Roles": [reference(role_id)],
            "PolicyDocument": {
                "Version": "2012-10-17",
                "Statement": [
                    {
                        "Effect": "Allow",
                        "Action": DATA_BUCKET_ACTIONS,
                        "Resource": [get_att(data_bucket_id, "Arn"), objects_arn(data_bucket_id)],
                    },
                    {
                        "Effect": "Allow",
                        "Action": "sns:Publish",
                        "Resource": reference(topic_id),
                    },
                ],
            },
        }),
    )
}

pub fn workout_function(
    config: &StackConfig,
    role_id: &str,
    policy_id: &str,
    data_bucket_id: &str,
    topic_id: &str,
) -> Resource {
    Resource::new(
        "AWS::Lambda::Function",
        json!({
            "Runtime": FUNCTION_RUNTIME,
            "Handler": FUNCTION_HANDLER,
            "Architectures": [config.architecture.as_str()],
            "Code": {
                "S3Bucket": config.code.bucket,
                "S3Key": config.code.key,
            },
            "Role": get_att(role_id, "Arn"),
            "Timeout": config.function_timeout_secs,
            "MemorySize": config.function_memory_mb,
            "Environment": {
                "Variables": {
                    DATA_BUCKET_ENV: reference(data_bucket_id),
                    TOPIC_ARN_ENV: reference(topic_id),
                },
            },
        }),
    )
    .depends_on(role_id)
    .depends_on(policy_id)
}

/// Public HTTPS endpoint. CORS stays in the handler so headers are not doubled.
pub fn function_url(function_id: &str) -> Resource {
    Resource::new(
        "AWS::Lambda::Url",
        json!({
            "AuthType": "NONE",
            "TargetFunctionArn": get_att(function_id, "Arn"),
        }),
    )
}

pub fn public_url_permission(function_id: &str) -> Resource {
    Resource::new(
        "AWS::Lambda::Permission",
        json!({
            "Action": "lambda:InvokeFunctionUrl",
            "FunctionName": get_att(function_id, "Arn"),
            "Principal": "*",
            "FunctionUrlAuthType": "NONE",
        }),
    )
}

/// Newer function URLs also check `lambda:InvokeFunction`, scoped here to URL calls.
pub fn public_invoke_permission(function_id: &str) -> Resource {
    Resource::new(
        "AWS::Lambda::Permission",
        json!({
            "Action": "lambda:InvokeFunction",
            "FunctionName": get_att(function_id, "Arn"),
            "Principal": "*",
            "InvokedViaFunctionUrl": true,
        }),
    )
}

fn basic_execution_policy_arn() -> Value {
    join(
        "",
        vec![
            json!("arn:"),
            partition(),
            json!(":iam::aws:policy/service-role/AWSLambdaBasicExecutionRole"),
        ],
    )
}
