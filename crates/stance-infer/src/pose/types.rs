use stance_base::{Rect, Vec2};

/// Number of keypoints in COCO pose format
pub const COCO_KEYPOINT_COUNT: usize = 17;

/// A single keypoint in source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Keypoint {
    pub position: Vec2<f32>,
    /// Raw model score, typically in [0.0, 1.0]. Never thresholded by the decoder.
    pub confidence: f32,
}

/// COCO keypoint indices for human pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointIndex {
    /// All keypoints in model output order.
    pub const ALL: [KeypointIndex; COCO_KEYPOINT_COUNT] = [
        KeypointIndex::Nose,
        KeypointIndex::LeftEye,
        KeypointIndex::RightEye,
        KeypointIndex::LeftEar,
        KeypointIndex::RightEar,
        KeypointIndex::LeftShoulder,
        KeypointIndex::RightShoulder,
        KeypointIndex::LeftElbow,
        KeypointIndex::RightElbow,
        KeypointIndex::LeftWrist,
        KeypointIndex::RightWrist,
        KeypointIndex::LeftHip,
        KeypointIndex::RightHip,
        KeypointIndex::LeftKnee,
        KeypointIndex::RightKnee,
        KeypointIndex::LeftAnkle,
        KeypointIndex::RightAnkle,
    ];

    /// Human-readable name, e.g. `"Left Shoulder"`.
    pub fn name(self) -> &'static str {
        match self {
            KeypointIndex::Nose => "Nose",
            KeypointIndex::LeftEye => "Left Eye",
            KeypointIndex::RightEye => "Right Eye",
            KeypointIndex::LeftEar => "Left Ear",
            KeypointIndex::RightEar => "Right Ear",
            KeypointIndex::LeftShoulder => "Left Shoulder",
            KeypointIndex::RightShoulder => "Right Shoulder",
            KeypointIndex::LeftElbow => "Left Elbow",
            KeypointIndex::RightElbow => "Right Elbow",
            KeypointIndex::LeftWrist => "Left Wrist",
            KeypointIndex::RightWrist => "Right Wrist",
            KeypointIndex::LeftHip => "Left Hip",
            KeypointIndex::RightHip => "Right Hip",
            KeypointIndex::LeftKnee => "Left Knee",
            KeypointIndex::RightKnee => "Right Knee",
            KeypointIndex::LeftAnkle => "Left Ankle",
            KeypointIndex::RightAnkle => "Right Ankle",
        }
    }
}

impl From<KeypointIndex> for usize {
    fn from(index: KeypointIndex) -> usize {
        index as usize
    }
}

impl TryFrom<usize> for KeypointIndex {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        KeypointIndex::ALL.get(value).copied().ok_or_else(|| {
            format!(
                "Invalid keypoint index: {}. Must be in range 0-{}.",
                value,
                COCO_KEYPOINT_COUNT - 1
            )
        })
    }
}

/// A detected person with bounding box and keypoints
#[derive(Debug, Clone, PartialEq)]
pub struct PoseDetection {
    /// Bounding box in source-image pixels, top-left origin
    pub bbox: Rect<f32>,
    /// Confidence score for the person detection
    pub confidence: f32,
    /// Array of 17 COCO keypoints
    pub keypoints: [Keypoint; COCO_KEYPOINT_COUNT],
}

impl PoseDetection {
    /// Get a keypoint by its semantic index
    pub fn keypoint(&self, index: KeypointIndex) -> &Keypoint {
        &self.keypoints[usize::from(index)]
    }
}

/// A decoded detection that has passed the confidence filter, tagged with the
/// output slot it came from. Lives for one decode/NMS pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionCandidate {
    pub pose: PoseDetection,
    /// Column index in the raw `[56, N]` output.
    pub slot: usize,
}
