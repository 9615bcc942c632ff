use crate::resources::dns::website_endpoint;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_FUNCTION_TIMEOUT_SECS: u32 = 30;
pub const DEFAULT_FUNCTION_MEMORY_MB: u32 = 256;
pub const DEFAULT_STACK_DESCRIPTION: &str =
    "FitLog Gym Tracker - Serverless workout tracking application";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Architecture {
    #[default]
    X86_64,
    Arm64,
}

impl Architecture {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Arm64 => "arm64",
        }
    }

    /// Lambda architecture matching a Rust target triple.
    pub fn from_target(target: &str) -> Self {
        if target.starts_with("aarch64") {
            Self::Arm64
        } else {
            Self::X86_64
        }
    }
}

/// Where the packaged `bootstrap` zip was uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLocation {
    pub bucket: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackConfig {
    pub description: String,
    /// Apex domain. The frontend bucket takes this exact name.
    pub domain_name: String,
    pub notification_email: Option<String>,
    pub region: String,
    pub code: CodeLocation,
    pub architecture: Architecture,
    pub function_timeout_secs: u32,
    pub function_memory_mb: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StackConfigError {
    #[error("domain_name cannot be empty")]
    EmptyDomain,
    #[error("domain_name '{0}' must not include a scheme or path")]
    DomainNotBare(String),
    #[error("notification_email '{0}' is not an email address")]
    InvalidEmail(String),
    #[error("region '{0}' has no known S3 website endpoint")]
    UnsupportedRegion(String),
    #[error("code location requires both a bucket and a key")]
    MissingCodeLocation,
    #[error("function_timeout_secs must be between 1 and 900, got {0}")]
    InvalidTimeout(u32),
    #[error("function_memory_mb must be between 128 and 10240, got {0}")]
    InvalidMemory(u32),
}

impl StackConfig {
    pub fn new(domain_name: impl Into<String>, code: CodeLocation) -> Self {
        Self {
            description: DEFAULT_STACK_DESCRIPTION.to_string(),
            domain_name: domain_name.into(),
            notification_email: None,
            region: DEFAULT_REGION.to_string(),
            code,
            architecture: Architecture::default(),
            function_timeout_secs: DEFAULT_FUNCTION_TIMEOUT_SECS,
            function_memory_mb: DEFAULT_FUNCTION_MEMORY_MB,
        }
    }

    pub fn with_notification_email(mut self, email: impl Into<String>) -> Self {
        self.notification_email = Some(email.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_architecture(mut self, architecture: Architecture) -> Self {
        self.architecture = architecture;
        self
    }

    pub fn validate(&self) -> Result<(), StackConfigError> {
        let domain = self.domain_name.trim();
        if domain.is_empty() {
            return Err(StackConfigError::EmptyDomain);
        }
        if domain.contains("://") || domain.contains('/') {
            return Err(StackConfigError::DomainNotBare(self.domain_name.clone()));
        }

        if let Some(email) = &self.notification_email {
            let valid = email
                .split_once('@')
                .map(|(local, host)| !local.is_empty() && !host.is_empty())
                .unwrap_or(false);
            if !valid {
                return Err(StackConfigError::InvalidEmail(email.clone()));
            }
        }

        if website_endpoint(&self.region).is_none() {
            return Err(StackConfigError::UnsupportedRegion(self.region.clone()));
        }

        if self.code.bucket.trim().is_empty() || self.code.key.trim().is_empty() {
            return Err(StackConfigError::MissingCodeLocation);
        }

        if !(1..=900).contains(&self.function_timeout_secs) {
            return Err(StackConfigError::InvalidTimeout(self.function_timeout_secs));
        }

        if !(128..=10_240).contains(&self.function_memory_mb) {
            return Err(StackConfigError::InvalidMemory(self.function_memory_mb));
        }

        Ok(())
    }
}
