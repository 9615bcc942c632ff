use serde_json::{json, Value};

use crate::intrinsics::{get_att, select, split};
use crate::template::Resource;

pub const API_SUBDOMAIN: &str = "api";
pub const CNAME_TTL_SECS: u32 = 1800;

/// S3 website endpoint for a region: (endpoint host, Route 53 hosted zone id).
pub fn website_endpoint(region: &str) -> Option<(&'static str, &'static str)> {
    let endpoint = match region {
        "us-east-1" => ("s3-website-us-east-1.amazonaws.com", "Z3AQBSTGFYJSTF"),
        "us-east-2" => ("s3-website.us-east-2.amazonaws.com", "Z2O1EMRO9K5GLX"),
        "us-west-1" => ("s3-website-us-west-1.amazonaws.com", "Z2F56UZL2M1ACD"),
        "us-west-2" => ("s3-website-us-west-2.amazonaws.com", "Z3BJ6K6RIION7M"),
        "eu-west-1" => ("s3-website-eu-west-1.amazonaws.com", "Z1BKCTXD74EZPE"),
        "eu-central-1" => ("s3-website.eu-central-1.amazonaws.com", "Z21DNDUVLTQW6Q"),
        "ap-southeast-1" => ("s3-website-ap-southeast-1.amazonaws.com", "Z3O0J2DXBE1FTB"),
        "ap-southeast-2" => ("s3-website-ap-southeast-2.amazonaws.com", "Z1WCIGYICN2BYD"),
        "ap-northeast-1" => ("s3-website-ap-northeast-1.amazonaws.com", "Z2M4EHUR26P7ZW"),
        _ => return None,
    };
    Some(endpoint)
}

/// Route 53 wants fully qualified names with the trailing dot.
pub fn fully_qualified(name: &str) -> String {
    format!("{}.", name.trim_end_matches('.'))
}

/// Apex `A` alias to the bucket website endpoint.
pub fn apex_website_alias(domain_name: &str, region: &str) -> Option<Resource> {
    let (endpoint, hosted_zone_id) = website_endpoint(region)?;
    Some(Resource::new(
        "AWS::Route53::RecordSet",
        json!({
            "HostedZoneName": fully_qualified(domain_name),
            "Name": fully_qualified(domain_name),
            "Type": "A",
            "AliasTarget": {
                "DNSName": endpoint,
                "HostedZoneId": hosted_zone_id,
            },
        }),
    ))
}

/// `api.{domain}` CNAME to the function URL host.
pub fn api_cname(domain_name: &str, function_url_id: &str) -> Resource {
    Resource::new(
        "AWS::Route53::RecordSet",
        json!({
            "HostedZoneName": fully_qualified(domain_name),
            "Name": fully_qualified(&format!("{API_SUBDOMAIN}.{domain_name}")),
            "Type": "CNAME",
            "TTL": CNAME_TTL_SECS.to_string(),
            "ResourceRecords": [function_url_host(function_url_id)],
        }),
    )
}

/// `https://<id>.lambda-url.<region>.on.aws/` split on `/` puts the host at index 2.
pub fn function_url_host(function_url_id: &str) -> Value {
    select(2, split("/", get_att(function_url_id, "FunctionUrl")))
}
