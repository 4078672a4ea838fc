//! Wire types for the `text-to-image` endpoint.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Fixed generation parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationParams {
    pub cfg_scale: u32,
    pub height: u32,
    pub width: u32,
    pub samples: u32,
    pub steps: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            cfg_scale: 7,
            height: 1024,
            width: 1024,
            samples: 1,
            steps: 30,
        }
    }
}

/// One weighted prompt. Only the text is used here.
#[derive(Debug, Clone, Serialize)]
pub struct TextPrompt {
    pub text: String,
}

/// Request body for `POST .../text-to-image`.
#[derive(Debug, Clone, Serialize)]
pub struct TextToImageRequest {
    pub text_prompts: Vec<TextPrompt>,
    #[serde(flatten)]
    pub params: GenerationParams,
}

impl TextToImageRequest {
    /// Build a request for a single prompt with the default parameters.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            text_prompts: vec![TextPrompt {
                text: prompt.into(),
            }],
            params: GenerationParams::default(),
        }
    }
}

/// One generated image in a response.
#[derive(Debug, Clone, Deserialize)]
pub struct Artifact {
    /// Base64-encoded image bytes.
    pub base64: String,
}

/// Successful response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TextToImageResponse {
    pub artifacts: Vec<Artifact>,
}

/// Why a successful response could not be turned into image bytes.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Response contained no artifacts")]
    Missing,

    #[error("Artifact is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Artifact decoded to an empty image")]
    Empty,
}

impl TextToImageResponse {
    /// Decode the first artifact's image payload.
    pub fn first_image(&self) -> Result<Vec<u8>, ArtifactError> {
        let artifact = self.artifacts.first().ok_or(ArtifactError::Missing)?;
        let bytes = STANDARD.decode(artifact.base64.trim())?;
        if bytes.is_empty() {
            return Err(ArtifactError::Empty);
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn request_serializes_flat() {
        let body = serde_json::to_value(TextToImageRequest::new("a cat")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "text_prompts": [{ "text": "a cat" }],
                "cfg_scale": 7,
                "height": 1024,
                "width": 1024,
                "samples": 1,
                "steps": 30,
            })
        );
    }

    #[test]
    fn first_artifact_is_decoded() {
        let response: TextToImageResponse = serde_json::from_value(serde_json::json!({
            "artifacts": [
                { "base64": STANDARD.encode(b"first"), "seed": 1, "finishReason": "SUCCESS" },
                { "base64": STANDARD.encode(b"second") },
            ]
        }))
        .unwrap();
        assert_eq!(response.first_image().unwrap(), b"first");
    }

    #[test]
    fn no_artifacts_is_an_error() {
        let response = TextToImageResponse { artifacts: vec![] };
        assert_matches!(response.first_image(), Err(ArtifactError::Missing));
    }

    #[test]
    fn bad_base64_is_an_error() {
        let response = TextToImageResponse {
            artifacts: vec![Artifact {
                base64: "!!not base64!!".to_string(),
            }],
        };
        assert_matches!(response.first_image(), Err(ArtifactError::InvalidBase64(_)));
    }

    #[test]
    fn empty_payload_is_an_error() {
        let response = TextToImageResponse {
            artifacts: vec![Artifact {
                base64: String::new(),
            }],
        };
        assert_matches!(response.first_image(), Err(ArtifactError::Empty));
    }
}
