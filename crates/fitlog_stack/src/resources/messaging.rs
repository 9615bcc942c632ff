use serde_json::json;

use crate::intrinsics::reference;
use crate::template::Resource;

pub const TOPIC_DISPLAY_NAME: &str = "FitLog Workout Notifications";
pub const TOPIC_NAME: &str = "FitLogNotifications";

pub fn notification_topic() -> Resource {
    Resource::new(
        "AWS::SNS::Topic",
        json!({
            "DisplayName": TOPIC_DISPLAY_NAME,
            "TopicName": TOPIC_NAME,
        }),
    )
}

/// Delivery starts once the recipient confirms the subscription email.
pub fn email_subscription(topic_id: &str, email: &str) -> Resource {
    Resource::new(
        "AWS::SNS::Subscription",
        json!({
            "Protocol": "email",
            "Endpoint": email,
            "TopicArn": reference(topic_id),
        }),
    )
}
