pub const DATA_BUCKET_ENV: &str = "DATA_BUCKET_NAME";
pub const TOPIC_ARN_ENV: &str = "SNS_TOPIC_ARN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub data_bucket: String,
    pub topic_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
}

impl HandlerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        Ok(Self {
            data_bucket: required(DATA_BUCKET_ENV)?,
            topic_arn: required(TOPIC_ARN_ENV)?,
        })
    }
}
