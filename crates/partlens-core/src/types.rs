//! Wire types exchanged with the detection backend.

use serde::{Deserialize, Serialize};

/// The backend's answer for one uploaded photo.
///
/// Every field is optional: the backend sends `null` for a piece it could not
/// identify, and older deployments omit inventory data entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Class name of the highest-confidence detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_piece: Option<String>,

    /// Detection confidence in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Annotated image: data URI, URL, static-relative path, or raw base64
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_image: Option<String>,

    /// Inventory record for the detected piece
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<PartInfo>,
}

/// Inventory record attached to a detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartInfo {
    /// Normalized piece name as stored in the inventory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Units on hand
    pub quantity: i64,

    /// Whether at least one unit is on hand
    pub in_stock: bool,
}

impl DetectionResult {
    /// The detected piece, if present and non-empty.
    pub fn piece(&self) -> Option<&str> {
        self.detected_piece.as_deref().filter(|p| !p.is_empty())
    }

    /// The annotated image reference, if present and non-empty.
    pub fn image(&self) -> Option<&str> {
        self.result_image.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_backend_response() {
        let json = r#"{
            "result_image": "/static/results/processed_image_1.jpg",
            "detected_piece": "junta_cria",
            "confidence": 0.91,
            "part": {"name": "junta_cria", "quantity": 0, "in_stock": false}
        }"#;
        let result: DetectionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.piece(), Some("junta_cria"));
        assert_eq!(result.confidence, Some(0.91));
        let part = result.part.unwrap();
        assert_eq!(part.quantity, 0);
        assert!(!part.in_stock);
    }

    #[test]
    fn test_parse_nulls_and_missing_fields() {
        let json = r#"{"result_image": "abc", "detected_piece": null, "confidence": 0.0, "part": null}"#;
        let result: DetectionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.piece(), None);
        assert!(result.part.is_none());

        let empty: DetectionResult = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, DetectionResult::default());
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let result = DetectionResult {
            detected_piece: Some(String::new()),
            result_image: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(result.piece(), None);
        assert_eq!(result.image(), None);
    }
}
