//! Turning a submitted image into a critique request, and a reply back into text.

use crate::error::CriticError;
use crate::upstream::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, ImageDetail, ImageUrl,
};

/// Instruction sent ahead of every image.
pub const CRITIQUE_PROMPT: &str = "Please provide one piece of actionable feedback directed towards novice painters. Ensure the feedback is honest and not generic or insincere.";

const DATA_URI_SCHEME: &str = "data:";
const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Accept either a full data URI or a bare base64 payload, which is assumed
/// to be JPEG. The payload itself is never inspected.
pub fn normalize_image_url(image: &str) -> String {
    if image.starts_with(DATA_URI_SCHEME) {
        image.to_string()
    } else {
        format!("{}{}", JPEG_DATA_URI_PREFIX, image)
    }
}

/// Single-turn request: the fixed prompt, then the image at high detail.
pub fn build_critique_request(model: &str, image_url: String) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage {
            role: "user",
            content: vec![
                ContentPart::Text {
                    text: CRITIQUE_PROMPT.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_url,
                        detail: ImageDetail::High,
                    },
                },
            ],
        }],
    }
}

/// Content of the first choice, unmodified.
pub fn extract_critique(response: ChatCompletionResponse) -> Result<String, CriticError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CriticError::UpstreamEmptyResponse)
}
