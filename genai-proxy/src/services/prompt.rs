//! Portrait prompt templating.
//!
//! A style label picks an (outfit, role) pair that is substituted into a fixed
//! instruction template, then paired with the caller's photo as inline data.

use crate::config::PortraitSettings;
use crate::models::gemini::{
    Content, ContentPart, GenerateContentRequest, GenerationConfig, ImageConfig, InlineData,
};
use crate::models::PortraitRequest;

/// Closed set of portrait styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Construction,
    Lawyer,
    Firefighter,
    Graduate,
    /// Any other label. Not rejected: role and outfit are left empty.
    Unrecognized,
}

impl Style {
    pub fn from_label(label: &str) -> Self {
        match label {
            "construction" => Style::Construction,
            "lawyer" => Style::Lawyer,
            "firefighter" => Style::Firefighter,
            "graduate" => Style::Graduate,
            _ => Style::Unrecognized,
        }
    }

    pub fn role(self) -> &'static str {
        match self {
            Style::Construction => "construction worker",
            Style::Lawyer => "barrister",
            Style::Firefighter => "firefighter",
            Style::Graduate => "university graduate",
            Style::Unrecognized => "",
        }
    }

    pub fn outfit(self) -> &'static str {
        match self {
            Style::Construction => {
                "wearing a yellow safety helmet and high-visibility reflective construction vest"
            }
            Style::Lawyer => "wearing a traditional white barrister wig and formal black lawyer gown",
            Style::Firefighter => "wearing a firefighter uniform and a safety helmet",
            Style::Graduate => "wearing a graduation gown and a mortarboard cap",
            Style::Unrecognized => "",
        }
    }
}

/// Fill the portrait instruction template for `style`.
pub fn build_prompt(style: Style) -> String {
    let role = style.role();
    let outfit = style.outfit();

    format!(
        "Analyze the uploaded image to understand the all people gender, approximate age, and facial features.

Then, generate a high-quality, photorealistic portrait of all people with those SAME physical attributes, posing as a {role}, {outfit}.

all people are facing the camera making a heart shape with hands.
The background should be a professional blurred environment suitable for a {role}.
Ensure the face is clearly visible and realistic. Do not produce a cartoon."
    )
}

/// Build the upstream payload: prompt text, the inbound photo, and image generation settings.
pub fn build_portrait_payload(
    request: &PortraitRequest,
    settings: &PortraitSettings,
) -> GenerateContentRequest {
    let style = Style::from_label(&request.style);
    if style == Style::Unrecognized {
        tracing::warn!(style = %request.style, "Unrecognized portrait style, prompting without role");
    }

    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                ContentPart::Text {
                    text: build_prompt(style),
                },
                ContentPart::InlineData {
                    inline_data: InlineData {
                        mime_type: settings.input_mime_type.clone(),
                        data: request.image_base64.clone(),
                    },
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["IMAGE".to_string()],
            image_config: ImageConfig {
                aspect_ratio: settings.aspect_ratio.clone(),
                image_size: settings.image_size.clone(),
            },
        },
    }
}
