//! Object localization — find labeled regions in images using the Google
//! Cloud Vision REST API.

use chairspot_core::Detection;

pub mod client;
pub mod geometry;

pub use client::{GoogleVision, ObjectLocalizer};
pub use geometry::bounding_rect;

/// Keep only detections whose label equals `label` exactly, preserving their
/// original order. Non-matching entries never influence the result.
pub fn matching_detections<'a>(detections: &'a [Detection], label: &str) -> Vec<&'a Detection> {
    detections.iter().filter(|d| d.label == label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chairspot_core::NormalizedVertex;

    fn det(label: &str) -> Detection {
        Detection {
            label: label.to_string(),
            score: 0.9,
            vertices: vec![NormalizedVertex { x: 0.0, y: 0.0 }],
        }
    }

    #[test]
    fn keeps_only_matching_labels() {
        let detections = vec![det("Chair"), det("Dog"), det("Chair"), det("Table")];
        let matching = matching_detections(&detections, "Chair");
        assert_eq!(matching.len(), 2);
        assert!(matching.iter().all(|d| d.label == "Chair"));
    }

    #[test]
    fn non_matching_order_is_irrelevant() {
        let a = vec![det("Dog"), det("Chair"), det("Table")];
        let b = vec![det("Table"), det("Dog"), det("Chair")];
        assert_eq!(
            matching_detections(&a, "Chair").len(),
            matching_detections(&b, "Chair").len()
        );
    }

    #[test]
    fn label_match_is_case_sensitive() {
        let detections = vec![det("chair")];
        assert!(matching_detections(&detections, "Chair").is_empty());
    }
}
