use stance_base::{Rect, log};
use std::cmp::Ordering;

use super::types::DetectionCandidate;

/// Compute Intersection over Union (IoU) between two bounding boxes
///
/// Returns 0.0 when the union area is not positive (no division by zero).
pub fn iou(a: &Rect<f32>, b: &Rect<f32>) -> f32 {
    let intersection = a.overlap_area(b);
    let union = a.area() + b.area() - intersection;
    if union > 0.0 { intersection / union } else { 0.0 }
}

/// Ranking used by NMS: confidence descending, then slot ascending so equal
/// scores always come out in the same order.
fn rank(a: &DetectionCandidate, b: &DetectionCandidate) -> Ordering {
    b.pose
        .confidence
        .total_cmp(&a.pose.confidence)
        .then(a.slot.cmp(&b.slot))
}

/// Greedy non-maximum suppression.
///
/// Candidates are ranked by confidence, then slot; each surviving candidate suppresses every
/// lower-ranked one whose box overlaps it with IoU strictly above
/// `iou_threshold`. Returns the survivors in acceptance order, payloads untouched.
pub fn non_max_suppression(
    mut candidates: Vec<DetectionCandidate>,
    iou_threshold: f32,
) -> Vec<DetectionCandidate> {
    candidates.sort_by(rank);

    let total = candidates.len();
    let mut suppressed = vec![false; total];

    for i in 0..total {
        if suppressed[i] {
            continue;
        }
        let bbox = candidates[i].pose.bbox;
        for j in (i + 1)..total {
            if !suppressed[j] && iou(&bbox, &candidates[j].pose.bbox) > iou_threshold {
                suppressed[j] = true;
            }
        }
    }

    // Every candidate that was never suppressed was accepted; sorted order is
    // acceptance order.
    let kept: Vec<DetectionCandidate> = candidates
        .into_iter()
        .zip(suppressed)
        .filter_map(|(candidate, suppressed)| (!suppressed).then_some(candidate))
        .collect();

    log::debug!("nms kept {} of {} candidates", kept.len(), total);
    kept
}
