use std::path::Path;

use anyhow::Context;
use axum::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const GEMINI_MODEL: &str = "gemini-2.5-flash-image";
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Error, Debug)]
pub enum GenerateError {
    /// The model answered without any inline image part. The only failure the
    /// orchestrator handles specially.
    #[error("Gemini no retornó ninguna imagen (Empty Response)")]
    EmptyGeneration,

    #[error("Gemini request failed: {0}")]
    Transport(#[from] anyhow::Error),
}

/// Prompt/model variant. Both share the same contract and error behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Full photorealistic generation from the reference photo.
    Full,
    /// Fast edit-style composition, used on the request path.
    FlashEdit,
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Composites the user photo with the fixed reference assets into a
    /// graduation photo. No retry, no timeout override, no backoff.
    async fn generate(
        &self,
        user_photo: Bytes,
        gender: &str,
        name: &str,
        career: &str,
    ) -> Result<Bytes, GenerateError>;
}

/// Fixed reference images sent alongside every request.
pub struct ReferenceAssets {
    pub background: Bytes,
    pub diploma: Bytes,
}

impl ReferenceAssets {
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let background = std::fs::read(dir.join("background.png"))
            .with_context(|| format!("read {}", dir.join("background.png").display()))?;
        let diploma = std::fs::read(dir.join("diploma.png"))
            .with_context(|| format!("read {}", dir.join("diploma.png").display()))?;
        Ok(Self {
            background: Bytes::from(background),
            diploma: Bytes::from(diploma),
        })
    }
}

pub struct GeminiGenerator {
    http: reqwest::Client,
    api_key: String,
    style: Style,
    assets: ReferenceAssets,
}

impl GeminiGenerator {
    pub fn new(api_key: String, style: Style, assets: ReferenceAssets) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            style,
            assets,
        }
    }
}

#[async_trait]
impl ImageGenerator for GeminiGenerator {
    async fn generate(
        &self,
        user_photo: Bytes,
        gender: &str,
        name: &str,
        career: &str,
    ) -> Result<Bytes, GenerateError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::text(build_prompt(self.style, gender, name, career)),
                    Part::inline("image/png", &user_photo),
                    Part::inline("image/png", &self.assets.background),
                    Part::inline("image/jpeg", &self.assets.diploma),
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".into()],
            },
        };

        let url = format!("{GEMINI_API_BASE}/models/{GEMINI_MODEL}:generateContent");
        tracing::info!(model = GEMINI_MODEL, style = ?self.style, "calling generation API");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("send generateContent")?
            .error_for_status()
            .context("generateContent status")?
            .json::<GenerateContentResponse>()
            .await
            .context("decode generateContent response")?;

        first_inline_image(&response)?.ok_or(GenerateError::EmptyGeneration)
    }
}

/// First inline-data part of the first candidate, base64-decoded.
fn first_inline_image(
    response: &GenerateContentResponse,
) -> Result<Option<Bytes>, GenerateError> {
    let part = response
        .candidates
        .iter()
        .flat_map(|c| c.content.parts.iter())
        .find_map(|p| p.inline_data.as_ref());
    match part {
        Some(inline) => {
            let bytes = BASE64
                .decode(&inline.data)
                .context("decode inline image data")?;
            Ok(Some(Bytes::from(bytes)))
        }
        None => Ok(None),
    }
}

/// Gender-branched prompt text. `name` and `career` are interpolated verbatim,
/// unescaped, matching the production prompts.
pub fn build_prompt(style: Style, gender: &str, name: &str, career: &str) -> String {
    let female = gender == "female";
    match style {
        Style::Full => {
            let (intro, holding) = if female {
                (
                    "She is celebrating her graduation. She should be wearing an elegant formal dress suitable for a graduation ceremony, looking professional, confident, and 5 years older than in the reference photo.\n\nCRITICAL: She must NOT be wearing a graduation gown (toga) or a graduation cap (birrete). She should only be wearing the elegant formal dress.",
                    "She is holding",
                )
            } else {
                (
                    "He is celebrating his graduation. He should be dressed formally in a white dress shirt, tie, and suit jacket. He looks professional, confident, and 5 years older than in the reference photo.",
                    "He is holding",
                )
            };
            format!(
                "Generate a high-quality, photorealistic 2K image of the person provided in the reference image (first image). {intro}\n\n\
                 KEY ELEMENTS FROM REFERENCES:\n\
                 1. DIPLOMA WITH FRAME: {holding} the specific graduation diploma shown in the third reference image.\n\
                    - CRITICAL: The diploma MUST include the black frame with the specific angular corners as shown in the reference image.\n\
                    - The text on the diploma MUST be modified to clearly display the name: \"{name}\" and the title: \"{career}\".\n\
                    - Keep the institution name \"Escuela Colombiana de Ingeniería Julio Garavito\" if visible in the reference.\n\
                    - Ensure the text is legible, correctly spelled, and matches the style of the reference diploma.\n\n\
                 2. BACKGROUND: The background MUST match the second reference image provided (a university campus setting).\n\
                    - Integrate the person naturally into this specific environment.\n\
                    - The lighting on the person should match the natural, sunny lighting of the background scene.\n\n\
                 The overall atmosphere should be solemn and happy, perfect for a graduation memory.",
                intro = intro,
                holding = holding,
                name = name,
                career = career,
            )
        }
        Style::FlashEdit => {
            let attire = if female {
                "The person should be wearing an elegant formal dress suitable for a graduation ceremony.\nShe must NOT wear a gown or cap."
            } else {
                "The person should be wearing a formal white shirt, tie, and suit jacket."
            };
            format!(
                "Edit the input image (the person) to create a high-quality graduation photo.\n{attire}\n\n\
                 COMPOSITION:\n\
                 - Person: {name}, looking professional and happy.\n\
                 - Holding: The diploma shown in the provided reference image (ensure the frame and text '{name}' / '{career}' are visible).\n\
                 - DIPLOMA FRAME: The diploma MUST be surrounded by a plain black frame.\n\
                 - SIGNATURES: DO NOT add any signatures, watermarks, or text overlays to the diploma or the image.\n\
                 - Background: Use the provided university campus background reference.\n\n\
                 Output a photorealistic image with 9:16 aspect ratio.",
                attire = attire,
                name = name,
                career = career,
            )
        }
    }
}

// --- wire types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: String) -> Self {
        Self {
            text: Some(text),
            inline_data: None,
        }
    }

    fn inline(mime_type: &str, data: &Bytes) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: BASE64.encode(data),
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default = "empty_content")]
    content: Content,
}

fn empty_content() -> Content {
    Content { parts: Vec::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_interpolates_name_and_career() {
        for style in [Style::Full, Style::FlashEdit] {
            let p = build_prompt(style, "male", "Juan Pérez", "Ingeniería de Sistemas");
            assert!(p.contains("Juan Pérez"));
            assert!(p.contains("Ingeniería de Sistemas"));
        }
    }

    #[test]
    fn test_prompt_gender_branch() {
        let female = build_prompt(Style::Full, "female", "Ana", "Economía");
        let male = build_prompt(Style::Full, "male", "Ana", "Economía");
        assert_ne!(female, male);
        assert!(female.contains("elegant formal dress"));
        assert!(male.contains("suit jacket"));
        // Anything that is not "female" takes the male branch.
        let other = build_prompt(Style::Full, "x", "Ana", "Economía");
        assert_eq!(other, male);
    }

    #[test]
    fn test_first_inline_image_picks_first_part() {
        let png = BASE64.encode(b"fake-png");
        let raw = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "here you go" },
                        { "inlineData": { "mimeType": "image/png", "data": png } },
                        { "inlineData": { "mimeType": "image/png", "data": BASE64.encode(b"second") } }
                    ]
                }
            }]
        });
        let resp: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let bytes = first_inline_image(&resp).unwrap().unwrap();
        assert_eq!(&bytes[..], b"fake-png");
    }

    #[test]
    fn test_text_only_response_is_empty_generation() {
        let raw = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "sorry" }] } }]
        });
        let resp: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert!(first_inline_image(&resp).unwrap().is_none());

        let resp: GenerateContentResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(first_inline_image(&resp).unwrap().is_none());
    }

    #[test]
    fn test_request_wire_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::text("prompt".into()),
                    Part::inline("image/png", &Bytes::from_static(b"img")),
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".into()],
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["generationConfig"]["responseModalities"][0], "IMAGE");
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/png"
        );
    }
}
