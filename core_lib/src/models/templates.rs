//! Request and response models for template generation

use serde::{Deserialize, Serialize};

/// Body of a `POST /api/templates/generate` request.
///
/// Only `scenario` is required; the handler substitutes the configured
/// placeholder when `target_company` is missing or blank.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateTemplateRequest {
    #[serde(default)]
    pub scenario: String,
    #[serde(default)]
    pub target_company: String,
    #[serde(default)]
    pub include_landing_page: bool,
}

/// The JSON object the external generator prints on stdout.
///
/// The script may emit additional keys (it adds an `error` field on known
/// failures); those are ignored. Missing fields decode as empty strings so
/// partial error payloads still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTemplate {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landing_page: Option<String>,
}
