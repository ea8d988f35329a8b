#![cfg(feature = "onnx")]

use stance_base::Tensor;
use stance_infer::{Backend, InferError, ModelSource, OnnxBackend, YoloPoseEstimator};

#[test]
fn test_backend_name() {
    assert_eq!(OnnxBackend.name(), "onnx");
}

#[test]
fn test_missing_model_file() {
    let result = OnnxBackend.load_model(ModelSource::File("/nonexistent/model.onnx".into()));
    assert!(matches!(result, Err(InferError::ModelLoad(_))));
}

#[test]
fn test_garbage_model_bytes() {
    let result = OnnxBackend.load_model(ModelSource::Memory(b"not a model".to_vec()));
    assert!(matches!(result, Err(InferError::ModelLoad(_))));
}

// Needs a YOLOv8 pose export at `models/yolov8n-pose.onnx`.
#[test]
#[ignore]
fn test_real_model_on_blank_image() {
    let model = ModelSource::File("../../models/yolov8n-pose.onnx".into());
    let mut estimator = YoloPoseEstimator::new(model, &OnnxBackend).unwrap();

    let image = Tensor::new(vec![480, 640, 3], vec![0u8; 480 * 640 * 3]).unwrap();
    let poses = estimator.estimate(&image).unwrap();
    assert!(poses.iter().all(|p| p.confidence >= 0.25));
}
