use fitlog_stack::topology::{
    StackError, API_RECORD_ID, DATA_BUCKET_ID, EMAIL_SUBSCRIPTION_ID, FRONTEND_BUCKET_ID,
    FUNCTION_INVOKE_PERMISSION_ID, FUNCTION_URL_ID, FUNCTION_URL_PERMISSION_ID,
    NOTIFICATION_TOPIC_ID, WORKOUT_FUNCTION_ID,
};
use fitlog_stack::{build_fitlog_stack, CodeLocation, StackConfig, StackConfigError};
use serde_json::{json, Value};

fn sample_config() -> StackConfig {
    StackConfig::new(
        "fitlog.example.com",
        CodeLocation {
            bucket: "fitlog-artifacts".to_string(),
            key: "assets/0123abcd.zip".to_string(),
        },
    )
}

fn render(config: &StackConfig) -> Value {
    let template = build_fitlog_stack(config).expect("stack should build");
    let rendered = template.to_json_pretty().expect("template should render");
    serde_json::from_str(&rendered).expect("rendered template is JSON")
}

#[test]
fn declares_every_resource_without_email() {
    let template = render(&sample_config());
    let resources = template["Resources"]
        .as_object()
        .expect("resources object");

    assert_eq!(resources.len(), 12);
    assert!(resources.get(EMAIL_SUBSCRIPTION_ID).is_none());
    assert_eq!(resources[FRONTEND_BUCKET_ID]["Type"], "AWS::S3::Bucket");
    assert_eq!(resources[DATA_BUCKET_ID]["Type"], "AWS::S3::Bucket");
    assert_eq!(resources[NOTIFICATION_TOPIC_ID]["Type"], "AWS::SNS::Topic");
    assert_eq!(resources[WORKOUT_FUNCTION_ID]["Type"], "AWS::Lambda::Function");
    assert_eq!(resources[FUNCTION_URL_ID]["Type"], "AWS::Lambda::Url");
}

#[test]
fn email_subscription_only_when_configured() {
    let template = render(&sample_config().with_notification_email("lifter@example.com"));
    let subscription = &template["Resources"][EMAIL_SUBSCRIPTION_ID];

    assert_eq!(subscription["Type"], "AWS::SNS::Subscription");
    assert_eq!(subscription["Properties"]["Endpoint"], "lifter@example.com");
    assert_eq!(
        subscription["Properties"]["TopicArn"],
        json!({"Ref": NOTIFICATION_TOPIC_ID})
    );
}

#[test]
fn function_reads_bucket_and_topic_from_environment() {
    let template = render(&sample_config());
    let variables = &template["Resources"][WORKOUT_FUNCTION_ID]["Properties"]["Environment"]
        ["Variables"];

    assert_eq!(variables["DATA_BUCKET_NAME"], json!({"Ref": DATA_BUCKET_ID}));
    assert_eq!(
        variables["SNS_TOPIC_ARN"],
        json!({"Ref": NOTIFICATION_TOPIC_ID})
    );
}

#[test]
fn api_cname_strips_scheme_from_function_url() {
    let template = render(&sample_config());
    let record = &template["Resources"][API_RECORD_ID]["Properties"];

    assert_eq!(record["Name"], "api.fitlog.example.com.");
    assert_eq!(record["HostedZoneName"], "fitlog.example.com.");
    assert_eq!(
        record["ResourceRecords"][0]["Fn::Select"][1]["Fn::Split"][0],
        "/"
    );
}

#[test]
fn outputs_describe_endpoints() {
    let template = render(&sample_config());
    let outputs = &template["Outputs"];

    assert_eq!(outputs["CustomDomainURL"]["Value"], "http://fitlog.example.com");
    assert_eq!(
        outputs["APIEndpoint"]["Value"],
        "https://api.fitlog.example.com"
    );
    assert_eq!(
        outputs["LambdaFunctionURL"]["Value"],
        json!({"Fn::GetAtt": [FUNCTION_URL_ID, "FunctionUrl"]})
    );
    assert_eq!(outputs.as_object().map(|map| map.len()), Some(8));
}

#[test]
fn function_url_is_publicly_invocable() {
    let template = render(&sample_config());
    let resources = &template["Resources"];

    assert_eq!(
        resources[FUNCTION_URL_PERMISSION_ID]["Properties"]["Action"],
        "lambda:InvokeFunctionUrl"
    );
    let invoke = &resources[FUNCTION_INVOKE_PERMISSION_ID]["Properties"];
    assert_eq!(invoke["Action"], "lambda:InvokeFunction");
    assert_eq!(invoke["Principal"], "*");
    assert_eq!(
        invoke["FunctionName"],
        json!({"Fn::GetAtt": [WORKOUT_FUNCTION_ID, "Arn"]})
    );
}

#[test]
fn buckets_are_removed_with_the_stack() {
    let template = render(&sample_config());
    for bucket in [FRONTEND_BUCKET_ID, DATA_BUCKET_ID] {
        assert_eq!(template["Resources"][bucket]["DeletionPolicy"], "Delete");
    }
}

#[test]
fn invalid_config_is_reported() {
    let mut config = sample_config();
    config.domain_name = "  ".to_string();

    let error = build_fitlog_stack(&config).expect_err("empty domain");
    assert_eq!(error, StackError::Config(StackConfigError::EmptyDomain));
}
