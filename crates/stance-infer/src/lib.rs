pub mod backend;
pub mod backends;
pub mod error;
pub mod modelsource;
pub mod pose;
pub mod session;

pub use backend::Backend;
pub use error::InferError;
pub use modelsource::ModelSource;
pub use session::Session;

#[cfg(feature = "onnx")]
pub use backends::OnnxBackend;

pub use pose::{
    iou, postprocess, preprocess, DetectionCandidate, Keypoint, KeypointIndex, LetterboxInfo,
    PoseConfig, PoseDetection, YoloPoseEstimator, COCO_KEYPOINT_COUNT,
};
