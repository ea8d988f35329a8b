//! Text and JSON renderings of pose detections.

use serde::{Deserialize, Serialize};
use stance_infer::{KeypointIndex, PoseDetection};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxReport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeypointReport {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonReport {
    pub confidence: f32,
    pub bbox: BoxReport,
    pub keypoints: Vec<KeypointReport>,
}

/// Everything written to the output file for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseReport {
    pub image: String,
    pub persons: Vec<PersonReport>,
}

impl From<&PoseDetection> for PersonReport {
    fn from(pose: &PoseDetection) -> Self {
        let keypoints = KeypointIndex::ALL
            .iter()
            .zip(pose.keypoints.iter())
            .map(|(index, kp)| KeypointReport {
                name: index.name().to_string(),
                x: kp.position.x,
                y: kp.position.y,
                confidence: kp.confidence,
            })
            .collect();
        Self {
            confidence: pose.confidence,
            bbox: BoxReport {
                x: pose.bbox.origin.x,
                y: pose.bbox.origin.y,
                width: pose.bbox.size.x,
                height: pose.bbox.size.y,
            },
            keypoints,
        }
    }
}

impl PoseReport {
    pub fn new(image: impl Into<String>, poses: &[PoseDetection]) -> Self {
        Self {
            image: image.into(),
            persons: poses.iter().map(PersonReport::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Human-readable listing, one block per person.
pub fn format_report(poses: &[PoseDetection]) -> String {
    if poses.is_empty() {
        return "No person detected in the image.\n".to_string();
    }

    let mut out = String::from("Detection Results:\n==================\n");
    for (i, pose) in poses.iter().enumerate() {
        let bbox = &pose.bbox;
        // Writing to a String cannot fail.
        let _ = writeln!(out, "\nPerson {}:", i + 1);
        let _ = writeln!(out, "  Confidence: {:.3}", pose.confidence);
        let _ = writeln!(
            out,
            "  Bounding Box: X={:.1}, Y={:.1}, W={:.1}, H={:.1}",
            bbox.origin.x, bbox.origin.y, bbox.size.x, bbox.size.y
        );
        let _ = writeln!(out, "  Keypoints:");
        for (index, kp) in KeypointIndex::ALL.iter().zip(pose.keypoints.iter()) {
            let _ = writeln!(
                out,
                "    {:<15}: ({:.1}, {:.1}) - Confidence: {:.3}",
                index.name(),
                kp.position.x,
                kp.position.y,
                kp.confidence
            );
        }
    }
    out
}
