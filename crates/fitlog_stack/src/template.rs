use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum DeletionPolicy {
    Delete,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    #[serde(rename = "Type")]
    pub resource_type: String,
    pub properties: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<DeletionPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_replace_policy: Option<DeletionPolicy>,
}

impl Resource {
    pub fn new(resource_type: &str, properties: Value) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            properties,
            depends_on: Vec::new(),
            deletion_policy: None,
            update_replace_policy: None,
        }
    }

    pub fn depends_on(mut self, logical_id: &str) -> Self {
        self.depends_on.push(logical_id.to_string());
        self
    }

    /// Applies the same policy to stack deletion and to replacement on update.
    pub fn removal_policy(mut self, policy: DeletionPolicy) -> Self {
        self.deletion_policy = Some(policy);
        self.update_replace_policy = Some(policy);
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    pub value: Value,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    pub description: String,
    pub resources: BTreeMap<String, Resource>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, Output>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("logical id '{0}' is declared more than once")]
    DuplicateLogicalId(String),
    #[error("'{from}' references undeclared resource '{missing}'")]
    DanglingDependency { from: String, missing: String },
}

impl Template {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            format_version: TEMPLATE_FORMAT_VERSION.to_string(),
            description: description.into(),
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    pub fn add_resource(
        &mut self,
        logical_id: &str,
        resource: Resource,
    ) -> Result<(), TemplateError> {
        if self.resources.contains_key(logical_id) {
            return Err(TemplateError::DuplicateLogicalId(logical_id.to_string()));
        }
        self.resources.insert(logical_id.to_string(), resource);
        Ok(())
    }

    pub fn add_output(&mut self, name: &str, value: Value, description: &str) {
        self.outputs.insert(
            name.to_string(),
            Output {
                value,
                description: description.to_string(),
            },
        );
    }

    /// Checks that every `DependsOn` entry names a declared resource.
    pub fn check_dependencies(&self) -> Result<(), TemplateError> {
        for (logical_id, resource) in &self.resources {
            for dependency in &resource.depends_on {
                if !self.resources.contains_key(dependency) {
                    return Err(TemplateError::DanglingDependency {
                        from: logical_id.clone(),
                        missing: dependency.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rejects_duplicate_logical_ids() {
        let mut template = Template::new("test");
        template
            .add_resource("Topic", Resource::new("AWS::SNS::Topic", json!({})))
            .expect("first declaration");
        let error = template
            .add_resource("Topic", Resource::new("AWS::SNS::Topic", json!({})))
            .expect_err("duplicate declaration");
        assert_eq!(error, TemplateError::DuplicateLogicalId("Topic".to_string()));
    }

    #[test]
    fn detects_dangling_depends_on() {
        let mut template = Template::new("test");
        template
            .add_resource(
                "Function",
                Resource::new("AWS::Lambda::Function", json!({})).depends_on("Role"),
            )
            .expect("declaration");
        assert_eq!(
            template.check_dependencies(),
            Err(TemplateError::DanglingDependency {
                from: "Function".to_string(),
                missing: "Role".to_string(),
            })
        );
    }

    #[test]
    fn serializes_cloudformation_shape() {
        let mut template = Template::new("demo");
        template
            .add_resource(
                "Bucket",
                Resource::new("AWS::S3::Bucket", json!({}))
                    .removal_policy(DeletionPolicy::Delete),
            )
            .expect("declaration");
        let value = serde_json::to_value(&template).expect("template serializes");

        assert_eq!(value["AWSTemplateFormatVersion"], "2010-09-09");
        assert_eq!(value["Description"], "demo");
        assert_eq!(value["Resources"]["Bucket"]["Type"], "AWS::S3::Bucket");
        assert_eq!(value["Resources"]["Bucket"]["DeletionPolicy"], "Delete");
        assert_eq!(value["Resources"]["Bucket"]["UpdateReplacePolicy"], "Delete");
        assert!(value["Resources"]["Bucket"].get("DependsOn").is_none());
        assert!(value.get("Outputs").is_none());
    }
}
