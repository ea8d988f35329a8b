mod config;
mod decode;
mod estimator;
mod letterbox;
mod nms;
mod postprocess;
mod preprocess;
mod skeleton;
mod types;

pub use config::PoseConfig;
pub use decode::{decode, decode_tensor, DEFAULT_NUM_DETECTIONS, NUM_CHANNELS};
pub use estimator::YoloPoseEstimator;
pub use letterbox::LetterboxInfo;
pub use nms::{iou, non_max_suppression};
pub use postprocess::postprocess;
pub use preprocess::preprocess;
pub use skeleton::{
    visible_connections, visible_keypoints, Connection, BLUE, CYAN, DISPLAY_CONFIDENCE_THRESHOLD,
    GREEN, MAGENTA, RED, SKELETON, YELLOW,
};
pub use types::{DetectionCandidate, Keypoint, KeypointIndex, PoseDetection, COCO_KEYPOINT_COUNT};
