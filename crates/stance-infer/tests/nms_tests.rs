use stance_base::{Rect, Vec2};
use stance_infer::pose::{
    iou, non_max_suppression, DetectionCandidate, Keypoint, PoseDetection, COCO_KEYPOINT_COUNT,
};

fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect<f32> {
    Rect::new(Vec2::new(x, y), Vec2::new(w, h))
}

fn candidate(slot: usize, confidence: f32, bbox: Rect<f32>) -> DetectionCandidate {
    DetectionCandidate {
        pose: PoseDetection {
            bbox,
            confidence,
            keypoints: [Keypoint {
                position: bbox.center(),
                confidence: 0.5,
            }; COCO_KEYPOINT_COUNT],
        },
        slot,
    }
}

fn slots(candidates: &[DetectionCandidate]) -> Vec<usize> {
    candidates.iter().map(|c| c.slot).collect()
}

#[test]
fn test_iou_non_overlapping() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(20.0, 20.0, 10.0, 10.0);
    assert_eq!(iou(&a, &b), 0.0);
}

#[test]
fn test_iou_identical() {
    let a = rect(3.0, 4.0, 10.0, 20.0);
    assert_eq!(iou(&a, &a), 1.0);
}

#[test]
fn test_iou_partial_overlap() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(5.0, 0.0, 10.0, 10.0);
    // Intersection: 5x10 = 50, Union: 100+100-50 = 150, IoU = 1/3
    assert!((iou(&a, &b) - 1.0 / 3.0).abs() < 1e-6);
}

#[test]
fn test_iou_is_symmetric() {
    let boxes = [
        rect(0.0, 0.0, 10.0, 10.0),
        rect(5.0, 3.0, 7.0, 12.0),
        rect(-4.0, 2.0, 30.0, 1.0),
        rect(9.0, 9.0, 1.0, 1.0),
        rect(100.0, 100.0, 5.0, 5.0),
    ];
    for a in &boxes {
        for b in &boxes {
            assert_eq!(iou(a, b), iou(b, a));
        }
    }
}

#[test]
fn test_iou_zero_area_boxes() {
    let empty = rect(0.0, 0.0, 0.0, 0.0);
    let b = rect(0.0, 0.0, 10.0, 10.0);
    assert_eq!(iou(&empty, &b), 0.0);
    assert_eq!(iou(&empty, &empty), 0.0);
}

#[test]
fn test_high_overlap_keeps_only_stronger() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(2.5, 0.0, 10.0, 10.0);
    assert_eq!(iou(&a, &b), 0.6);

    let kept = non_max_suppression(vec![candidate(0, 0.8, b), candidate(1, 0.9, a)], 0.45);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].pose.confidence, 0.9);
    assert_eq!(kept[0].slot, 1);
}

#[test]
fn test_low_overlap_keeps_both() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(10.0 - 20.0 / 11.0, 0.0, 10.0, 10.0);
    assert!((iou(&a, &b) - 0.1).abs() < 1e-5);

    let kept = non_max_suppression(vec![candidate(0, 0.3, a), candidate(1, 0.7, b)], 0.45);
    assert_eq!(slots(&kept), vec![1, 0]);
}

#[test]
fn test_iou_equal_to_threshold_is_not_suppressed() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(2.5, 0.0, 10.0, 10.0);
    let kept = non_max_suppression(vec![candidate(0, 0.9, a), candidate(1, 0.8, b)], 0.6);
    assert_eq!(kept.len(), 2);
}

#[test]
fn test_empty_input() {
    assert!(non_max_suppression(Vec::new(), 0.45).is_empty());
}

#[test]
fn test_equal_confidence_breaks_ties_by_slot() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let far = rect(100.0, 100.0, 10.0, 10.0);
    let input = vec![
        candidate(9, 0.8, far),
        candidate(2, 0.8, a),
        candidate(5, 0.8, rect(200.0, 0.0, 10.0, 10.0)),
    ];
    assert_eq!(slots(&non_max_suppression(input.clone(), 0.45)), vec![2, 5, 9]);

    let mut reversed = input;
    reversed.reverse();
    assert_eq!(slots(&non_max_suppression(reversed, 0.45)), vec![2, 5, 9]);
}

#[test]
fn test_tied_overlapping_candidates_keep_lowest_slot() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(1.0, 0.0, 10.0, 10.0);
    let kept = non_max_suppression(vec![candidate(7, 0.5, b), candidate(3, 0.5, a)], 0.45);
    assert_eq!(slots(&kept), vec![3]);
}

#[test]
fn test_suppressed_candidate_does_not_suppress_others() {
    // a suppresses b; b would suppress c, but b is gone so c survives.
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(4.0, 0.0, 10.0, 10.0);
    let c = rect(8.0, 0.0, 10.0, 10.0);
    assert!(iou(&a, &b) > 0.3);
    assert!(iou(&b, &c) > 0.3);
    assert!(iou(&a, &c) < 0.3);

    let kept = non_max_suppression(
        vec![candidate(0, 0.9, a), candidate(1, 0.8, b), candidate(2, 0.7, c)],
        0.3,
    );
    assert_eq!(slots(&kept), vec![0, 2]);
}

fn crowded_scene() -> Vec<DetectionCandidate> {
    let mut candidates = Vec::new();
    let mut slot = 0;
    for row in 0..6 {
        for col in 0..6 {
            let x = col as f32 * 7.0 + (row % 2) as f32 * 3.0;
            let y = row as f32 * 6.0;
            let confidence = 0.3 + ((row * 6 + col) * 37 % 70) as f32 / 100.0;
            candidates.push(candidate(slot, confidence, rect(x, y, 12.0, 10.0)));
            slot += 1;
        }
    }
    candidates
}

#[test]
fn test_survivors_do_not_overlap_above_threshold() {
    let threshold = 0.45;
    let kept = non_max_suppression(crowded_scene(), threshold);
    assert!(!kept.is_empty());
    for (i, a) in kept.iter().enumerate() {
        for b in &kept[i + 1..] {
            assert!(iou(&a.pose.bbox, &b.pose.bbox) <= threshold);
        }
    }
}

#[test]
fn test_output_sorted_by_confidence_and_payload_untouched() {
    let input = crowded_scene();
    let kept = non_max_suppression(input.clone(), 0.45);
    for pair in kept.windows(2) {
        assert!(pair[0].pose.confidence >= pair[1].pose.confidence);
    }
    for survivor in &kept {
        assert_eq!(survivor, &input[survivor.slot]);
    }
}

#[test]
fn test_nms_is_idempotent() {
    let once = non_max_suppression(crowded_scene(), 0.45);
    let twice = non_max_suppression(once.clone(), 0.45);
    assert_eq!(once, twice);
}
