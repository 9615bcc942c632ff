use serde_json::json;

use crate::config::{StackConfig, StackConfigError};
use crate::intrinsics::{get_att, reference};
use crate::resources::dns::{api_cname, apex_website_alias, API_SUBDOMAIN};
use crate::resources::{compute, messaging, storage};
use crate::template::{Template, TemplateError};

pub const FRONTEND_BUCKET_ID: &str = "FitLogFrontendBucket";
pub const FRONTEND_BUCKET_POLICY_ID: &str = "FitLogFrontendBucketPolicy";
pub const DATA_BUCKET_ID: &str = "FitLogDataBucket";
pub const NOTIFICATION_TOPIC_ID: &str = "FitLogNotificationTopic";
pub const EMAIL_SUBSCRIPTION_ID: &str = "FitLogNotificationEmailSubscription";
pub const EXECUTION_ROLE_ID: &str = "WorkoutHandlerRole";
pub const DATA_ACCESS_POLICY_ID: &str = "WorkoutHandlerDataAccessPolicy";
pub const WORKOUT_FUNCTION_ID: &str = "WorkoutHandler";
pub const FUNCTION_URL_ID: &str = "WorkoutHandlerFunctionUrl";
pub const FUNCTION_URL_PERMISSION_ID: &str = "WorkoutHandlerPublicUrlPermission";
pub const FUNCTION_INVOKE_PERMISSION_ID: &str = "WorkoutHandlerPublicInvokePermission";
pub const FRONTEND_RECORD_ID: &str = "FitLogFrontendARecord";
pub const API_RECORD_ID: &str = "FitLogAPICName";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    #[error("invalid stack configuration: {0}")]
    Config(#[from] StackConfigError),
    #[error("invalid template: {0}")]
    Template(#[from] TemplateError),
}

/// Declares the whole deployment: static site bucket, data bucket, topic,
/// workout function with its public URL, and the two DNS records.
pub fn build_fitlog_stack(config: &StackConfig) -> Result<Template, StackError> {
    config.validate()?;
    let domain = config.domain_name.trim();

    let mut template = Template::new(config.description.clone());

    template.add_resource(FRONTEND_BUCKET_ID, storage::frontend_bucket(domain))?;
    template.add_resource(
        FRONTEND_BUCKET_POLICY_ID,
        storage::public_read_policy(FRONTEND_BUCKET_ID),
    )?;
    template.add_resource(DATA_BUCKET_ID, storage::data_bucket())?;

    template.add_resource(NOTIFICATION_TOPIC_ID, messaging::notification_topic())?;
    if let Some(email) = &config.notification_email {
        template.add_resource(
            EMAIL_SUBSCRIPTION_ID,
            messaging::email_subscription(NOTIFICATION_TOPIC_ID, email),
        )?;
    }

    template.add_resource(EXECUTION_ROLE_ID, compute::execution_role())?;
    template.add_resource(
        DATA_ACCESS_POLICY_ID,
        compute::data_access_policy(EXECUTION_ROLE_ID, DATA_BUCKET_ID, NOTIFICATION_TOPIC_ID),
    )?;
    template.add_resource(
        WORKOUT_FUNCTION_ID,
        compute::workout_function(
            config,
            EXECUTION_ROLE_ID,
            DATA_ACCESS_POLICY_ID,
            DATA_BUCKET_ID,
            NOTIFICATION_TOPIC_ID,
        ),
    )?;
    template.add_resource(FUNCTION_URL_ID, compute::function_url(WORKOUT_FUNCTION_ID))?;
    template.add_resource(
        FUNCTION_URL_PERMISSION_ID,
        compute::public_url_permission(WORKOUT_FUNCTION_ID),
    )?;
    template.add_resource(
        FUNCTION_INVOKE_PERMISSION_ID,
        compute::public_invoke_permission(WORKOUT_FUNCTION_ID),
    )?;

    let apex_record = apex_website_alias(domain, &config.region)
        .ok_or_else(|| StackConfigError::UnsupportedRegion(config.region.clone()))?;
    template.add_resource(FRONTEND_RECORD_ID, apex_record.depends_on(FRONTEND_BUCKET_ID))?;
    template.add_resource(API_RECORD_ID, api_cname(domain, FUNCTION_URL_ID))?;

    add_outputs(&mut template, domain);
    template.check_dependencies()?;

    Ok(template)
}

fn add_outputs(template: &mut Template, domain: &str) {
    template.add_output(
        "FrontendBucketName",
        reference(FRONTEND_BUCKET_ID),
        "Frontend S3 Bucket Name",
    );
    template.add_output(
        "FrontendBucketWebsiteURL",
        get_att(FRONTEND_BUCKET_ID, "WebsiteURL"),
        "Frontend S3 Website URL",
    );
    template.add_output(
        "CustomDomainURL",
        json!(format!("http://{domain}")),
        "Custom Domain URL for Frontend (configure DNS first)",
    );
    template.add_output(
        "LambdaFunctionURL",
        get_att(FUNCTION_URL_ID, "FunctionUrl"),
        "Lambda Function URL (Direct HTTPS endpoint)",
    );
    template.add_output(
        "APIEndpoint",
        json!(format!("https://{API_SUBDOMAIN}.{domain}")),
        "API Endpoint via Route53 CNAME (after DNS propagation)",
    );
    template.add_output(
        "DataBucketName",
        reference(DATA_BUCKET_ID),
        "S3 Bucket for workout data",
    );
    template.add_output(
        "SNSTopicArn",
        reference(NOTIFICATION_TOPIC_ID),
        "SNS Topic ARN for notifications",
    );
    template.add_output(
        "HostedZoneName",
        json!(domain),
        "Route 53 Hosted Zone the records are created in",
    );
}
