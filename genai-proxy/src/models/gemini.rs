//! Wire types for the Gemini `generateContent` call.
//!
//! The request side keeps `inline_data`/`mime_type` in snake_case while the response
//! side arrives as `inlineData`/`mimeType`; the API accepts and emits both forms.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ContentPart {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
    pub image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: String,
    pub image_size: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default)]
    pub inline_data: Option<ResponseBlob>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBlob {
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub data: String,
}

/// The first part of the first candidate that carries inline data.
///
/// Only `candidates[0].content.parts` is read, and each part is decoded on its own, so a
/// malformed sibling candidate or part does not hide the image.
pub fn first_inline_data(body: &Value) -> Option<ResponseBlob> {
    body.pointer("/candidates/0/content/parts")?
        .as_array()?
        .iter()
        .filter_map(|part| ResponsePart::deserialize(part).ok())
        .find_map(|part| part.inline_data)
}

impl ResponseBlob {
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}
