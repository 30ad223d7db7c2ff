//! Data models for weekly plan templates

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tasks::Category;

/// A reusable weekly plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// One slot in a template week. `day_number` is 1-based within the week,
/// applied relative to the apply start date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateTask {
    pub id: Uuid,
    pub template_id: Uuid,
    pub day_number: u8,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Defaulted to Other at apply time when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Defaulted to 30 at apply time when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_minutes: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplateTask {
    pub template_id: Uuid,
    pub day_number: u8,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_minutes: Option<u32>,
}

impl NewTemplateTask {
    pub fn new(template_id: Uuid, day_number: u8, title: impl Into<String>) -> Self {
        Self {
            template_id,
            day_number,
            title: title.into(),
            description: None,
            category: None,
            expected_minutes: None,
        }
    }
}
