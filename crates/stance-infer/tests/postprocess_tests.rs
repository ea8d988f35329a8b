use stance_base::Tensor;
use stance_infer::{postprocess, InferError, LetterboxInfo};

/// Fill a detection in a `[1, 56, n]` tensor data buffer
fn fill_detection(data: &mut [f32], n: usize, slot: usize, cx: f32, cy: f32, w: f32, h: f32, conf: f32) {
    for (channel, value) in [cx, cy, w, h, conf].into_iter().enumerate() {
        data[channel * n + slot] = value;
    }
}

fn identity_letterbox() -> LetterboxInfo {
    LetterboxInfo::compute(640, 640, 640, 640).unwrap()
}

#[test]
fn test_postprocess_invalid_shape_returns_error() {
    let output = Tensor::new(vec![1, 10, 5], vec![0.0; 10 * 5]).unwrap();
    let result = postprocess(&output, &identity_letterbox(), 0.25, 0.45);
    assert!(matches!(result, Err(InferError::InvalidInputShape { .. })));
}

#[test]
fn test_postprocess_zero_scale_returns_error() {
    let n = 2;
    let mut data = vec![0.0; 56 * n];
    fill_detection(&mut data, n, 0, 100.0, 100.0, 20.0, 20.0, 0.9);
    let output = Tensor::new(vec![1, 56, n], data).unwrap();
    let letterbox = LetterboxInfo {
        scale: 0.0,
        ..identity_letterbox()
    };

    let result = postprocess(&output, &letterbox, 0.25, 0.45);
    assert!(matches!(result, Err(InferError::DegenerateGeometry(_))));
}

#[test]
fn test_postprocess_confidence_filtering() {
    let mut data = vec![0.0; 56 * 2];
    fill_detection(&mut data, 2, 0, 320.0, 320.0, 100.0, 100.0, 0.8);
    fill_detection(&mut data, 2, 1, 100.0, 100.0, 50.0, 50.0, 0.1);

    let output = Tensor::new(vec![1, 56, 2], data).unwrap();
    let detections = postprocess(&output, &identity_letterbox(), 0.25, 0.45).unwrap();
    assert_eq!(detections.len(), 1);
    assert!((detections[0].confidence - 0.8).abs() < 0.01);
}

#[test]
fn test_postprocess_nms_suppression() {
    let mut data = vec![0.0; 56 * 2];
    fill_detection(&mut data, 2, 0, 320.0, 320.0, 100.0, 100.0, 0.7);
    // Almost the same position, higher confidence, later slot
    fill_detection(&mut data, 2, 1, 325.0, 325.0, 100.0, 100.0, 0.9);

    let output = Tensor::new(vec![1, 56, 2], data).unwrap();
    let detections = postprocess(&output, &identity_letterbox(), 0.25, 0.45).unwrap();
    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].confidence, 0.9);
}

#[test]
fn test_postprocess_sorted_by_confidence() {
    let n = 3;
    let mut data = vec![0.0; 56 * n];
    fill_detection(&mut data, n, 0, 100.0, 100.0, 50.0, 50.0, 0.4);
    fill_detection(&mut data, n, 1, 300.0, 300.0, 50.0, 50.0, 0.95);
    fill_detection(&mut data, n, 2, 500.0, 500.0, 50.0, 50.0, 0.6);

    let output = Tensor::new(vec![1, 56, n], data).unwrap();
    let detections = postprocess(&output, &identity_letterbox(), 0.25, 0.45).unwrap();
    let confidences: Vec<f32> = detections.iter().map(|d| d.confidence).collect();
    assert_eq!(confidences, vec![0.95, 0.6, 0.4]);
}

#[test]
fn test_postprocess_empty_input() {
    let output = Tensor::new(vec![1, 56, 0], vec![]).unwrap();
    let detections = postprocess(&output, &identity_letterbox(), 0.25, 0.45).unwrap();
    assert!(detections.is_empty());
}

#[test]
fn test_postprocess_round_trip_coordinates() {
    // Original image 640x480 (W x H): scale 1.0, pad_y 80
    let (orig_cx, orig_cy, orig_w, orig_h) = (200.0_f32, 300.0_f32, 100.0_f32, 80.0_f32);
    let letterbox = LetterboxInfo::compute(640, 480, 640, 640).unwrap();
    assert_eq!(letterbox.pad_y, 80.0);

    let mut data = vec![0.0; 56];
    data[0] = orig_cx * letterbox.scale + letterbox.pad_x;
    data[1] = orig_cy * letterbox.scale + letterbox.pad_y;
    data[2] = orig_w * letterbox.scale;
    data[3] = orig_h * letterbox.scale;
    data[4] = 0.9;

    let output = Tensor::new(vec![1, 56, 1], data).unwrap();
    let detections = postprocess(&output, &letterbox, 0.25, 0.45).unwrap();
    assert_eq!(detections.len(), 1);

    let center = detections[0].bbox.center();
    assert!((center.x - orig_cx).abs() < 1.0, "cx {} vs {}", center.x, orig_cx);
    assert!((center.y - orig_cy).abs() < 1.0, "cy {} vs {}", center.y, orig_cy);
    assert!((detections[0].bbox.size.x - orig_w).abs() < 1.0);
    assert!((detections[0].bbox.size.y - orig_h).abs() < 1.0);
}
