//! Google Cloud Vision client for object localization.
//!
//! Posts raw image bytes (base64, JSON body) to `images:annotate` with an
//! `OBJECT_LOCALIZATION` feature and maps the response into core
//! [`Detection`] values. The call is fallible and never retried.

use anyhow::{Result, bail};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use chairspot_core::{Detection, NormalizedVertex};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const ANNOTATE_URL: &str = "https://vision.googleapis.com/v1/images:annotate";
const MAX_RESULTS: u32 = 50;

/// Remote object-detection service, injected into the pipeline so tests can
/// substitute a fake.
#[async_trait]
pub trait ObjectLocalizer: Send + Sync {
    /// Localize objects in one encoded image. Returns every labeled polygon
    /// the service found, unfiltered.
    async fn localize(&self, image_bytes: &[u8]) -> Result<Vec<Detection>>;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct AnnotateRequest<'a> {
    requests: Vec<AnnotateEntry<'a>>,
}

#[derive(Serialize)]
struct AnnotateEntry<'a> {
    image: ImageContent<'a>,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct ImageContent<'a> {
    content: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
    max_results: u32,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateResult {
    #[serde(default)]
    localized_object_annotations: Vec<ObjectAnnotation>,
    error: Option<ApiStatus>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectAnnotation {
    name: String,
    #[serde(default)]
    score: f32,
    bounding_poly: BoundingPoly,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoundingPoly {
    #[serde(default)]
    normalized_vertices: Vec<WireVertex>,
}

/// The API omits `x`/`y` fields whose value is zero.
#[derive(Deserialize, Default)]
struct WireVertex {
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
}

#[derive(Deserialize)]
struct ApiStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct GoogleVision {
    api_key: String,
    http: Client,
}

impl GoogleVision {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ObjectLocalizer for GoogleVision {
    async fn localize(&self, image_bytes: &[u8]) -> Result<Vec<Detection>> {
        let content = STANDARD.encode(image_bytes);
        let body = AnnotateRequest {
            requests: vec![AnnotateEntry {
                image: ImageContent { content: &content },
                features: vec![Feature {
                    feature_type: "OBJECT_LOCALIZATION",
                    max_results: MAX_RESULTS,
                }],
            }],
        };

        let resp = self
            .http
            .post(format!("{}?key={}", ANNOTATE_URL, self.api_key))
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            bail!(
                "vision API error: {}",
                resp.text().await.unwrap_or_default()
            );
        }

        let parsed: AnnotateResponse = resp.json().await?;
        let Some(result) = parsed.responses.into_iter().next() else {
            return Ok(Vec::new());
        };
        if let Some(status) = result.error {
            bail!("vision API error {}: {}", status.code, status.message);
        }

        let detections = result
            .localized_object_annotations
            .into_iter()
            .map(annotation_into_detection)
            .collect::<Vec<_>>();
        debug!(count = detections.len(), "object localization complete");
        Ok(detections)
    }
}

fn annotation_into_detection(annotation: ObjectAnnotation) -> Detection {
    Detection {
        label: annotation.name,
        score: annotation.score,
        vertices: annotation
            .bounding_poly
            .normalized_vertices
            .into_iter()
            .map(|v| NormalizedVertex { x: v.x, y: v.y })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_annotate_response() {
        let raw = r#"{
            "responses": [{
                "localizedObjectAnnotations": [{
                    "name": "Chair",
                    "score": 0.87,
                    "boundingPoly": {
                        "normalizedVertices": [
                            {"x": 0.1, "y": 0.2},
                            {"x": 0.5, "y": 0.2},
                            {"x": 0.5, "y": 0.8},
                            {"x": 0.1, "y": 0.8}
                        ]
                    }
                }]
            }]
        }"#;
        let parsed: AnnotateResponse = serde_json::from_str(raw).unwrap();
        let result = parsed.responses.into_iter().next().unwrap();
        assert_eq!(result.localized_object_annotations.len(), 1);
        let det = annotation_into_detection(
            result.localized_object_annotations.into_iter().next().unwrap(),
        );
        assert_eq!(det.label, "Chair");
        assert_eq!(det.vertices.len(), 4);
        assert_eq!(det.vertices[2], NormalizedVertex { x: 0.5, y: 0.8 });
    }

    #[test]
    fn absent_vertex_fields_read_as_zero() {
        // The API drops x/y fields at the image edge (value 0).
        let raw = r#"{
            "responses": [{
                "localizedObjectAnnotations": [{
                    "name": "Chair",
                    "boundingPoly": {
                        "normalizedVertices": [{"y": 0.3}, {"x": 0.9, "y": 0.9}]
                    }
                }]
            }]
        }"#;
        let parsed: AnnotateResponse = serde_json::from_str(raw).unwrap();
        let annotation = parsed.responses[0].localized_object_annotations[0]
            .bounding_poly
            .normalized_vertices[0]
            .x;
        assert_eq!(annotation, 0.0);
    }

    #[test]
    fn empty_response_body_parses() {
        let parsed: AnnotateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.responses.is_empty());
    }
}
