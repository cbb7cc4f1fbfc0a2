use serde::{Deserialize, Serialize};

use crate::common::require_text;
use crate::error::AppError;

pub const TEMPLATE_TYPES: &[&str] = &["email", "sms", "push", "in_app"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationTemplate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub template_type: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub variables: Vec<String>,
}

/// Create/update payload for a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateInput {
    pub name: String,
    #[serde(rename = "type")]
    pub template_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub content: String,
    #[serde(default)]
    pub variables: Vec<String>,
}

impl TemplateInput {
    pub fn from_template(t: &NotificationTemplate) -> Self {
        Self {
            name: t.name.clone(),
            template_type: t.template_type.clone(),
            subject: t.subject.clone(),
            content: t.content.clone(),
            variables: t.variables.clone(),
        }
    }

    /// Name and content are required. Variables are collected from
    /// `{{placeholder}}` markers in the subject and content.
    pub fn validated(mut self) -> Result<Self, AppError> {
        const REQUIRED: &str = "Please fill all required fields";
        self.name = require_text(&self.name, REQUIRED)?;
        self.content = require_text(&self.content, REQUIRED)?;
        if self.template_type.trim().is_empty() {
            self.template_type = "email".to_string();
        }
        self.subject = self
            .subject
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let mut variables = template_variables(self.subject.as_deref().unwrap_or_default());
        for v in template_variables(&self.content) {
            if !variables.contains(&v) {
                variables.push(v);
            }
        }
        self.variables = variables;
        Ok(self)
    }
}

/// Placeholder names in order of first appearance.
pub fn template_variables(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else { break };
        let name = after[..end].trim();
        if !name.is_empty() && !found.iter().any(|f: &String| f == name) {
            found.push(name.to_string());
        }
        rest = &after[end + 2..];
    }
    found
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestNotificationRequest {
    pub email: String,
}

/// Which delivery channels are switched on platform-wide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub push_enabled: bool,
    pub in_app_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyUserRequest {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn variables_are_collected_once_in_order() {
        assert_eq!(
            template_variables("Hi {{ name }}, bid {{bid_title}} closes {{deadline}}. Thanks {{name}}"),
            vec!["name", "bid_title", "deadline"]
        );
        assert!(template_variables("no markers {{ unterminated").is_empty());
    }

    #[test]
    fn validated_requires_name_and_content() {
        let err = TemplateInput::default().validated().unwrap_err();
        assert_eq!(err.message, "Please fill all required fields");
    }

    #[test]
    fn validated_merges_subject_and_body_variables() {
        let input = TemplateInput {
            name: " Bid awarded ".into(),
            template_type: String::new(),
            subject: Some("{{project}} update".into()),
            content: "Congrats {{name}}, you won {{project}}".into(),
            variables: vec![],
        }
        .validated()
        .unwrap();
        assert_eq!(input.name, "Bid awarded");
        assert_eq!(input.template_type, "email");
        assert_eq!(input.variables, vec!["project", "name"]);
    }
}
