use serde_json::{json, Value};

use crate::intrinsics::{get_att, join, reference};
use crate::template::{DeletionPolicy, Resource};

pub const WEBSITE_INDEX_DOCUMENT: &str = "index.html";

/// Public website bucket. The name must equal the domain for the Route 53
/// alias to resolve to it.
pub fn frontend_bucket(domain_name: &str) -> Resource {
    Resource::new(
        "AWS::S3::Bucket",
        json!({
            "BucketName": domain_name,
            "WebsiteConfiguration": {
                "IndexDocument": WEBSITE_INDEX_DOCUMENT,
            },
            "PublicAccessBlockConfiguration": {
                "BlockPublicAcls": false,
                "BlockPublicPolicy": false,
                "IgnorePublicAcls": false,
                "RestrictPublicBuckets": false,
            },
        }),
    )
    .removal_policy(DeletionPolicy::Delete)
}

pub fn public_read_policy(bucket_id: &str) -> Resource {
    Resource::new(
        "AWS::S3::BucketPolicy",
        json!({
            "Bucket": reference(bucket_id),
            "PolicyDocument": {
                "Version": "2012-10-17",
                "Statement": [{
                    "Effect": "Allow",
                    "Principal": { "AWS": "*" },
                    "Action": "s3:GetObject",
                    "Resource": objects_arn(bucket_id),
                }],
            },
        }),
    )
}

/// Private, versioned, SSE-S3 encrypted bucket for workout records.
pub fn data_bucket() -> Resource {
    Resource::new(
        "AWS::S3::Bucket",
        json!({
            "VersioningConfiguration": { "Status": "Enabled" },
            "BucketEncryption": {
                "ServerSideEncryptionConfiguration": [{
                    "ServerSideEncryptionByDefault": { "SSEAlgorithm": "AES256" },
                }],
            },
            "PublicAccessBlockConfiguration": {
                "BlockPublicAcls": true,
                "BlockPublicPolicy": true,
                "IgnorePublicAcls": true,
                "RestrictPublicBuckets": true,
            },
        }),
    )
    .removal_policy(DeletionPolicy::Delete)
}

/// `arn:...:bucket/*`
pub fn objects_arn(bucket_id: &str) -> Value {
    join("", vec![get_att(bucket_id, "Arn"), json!("/*")])
}
