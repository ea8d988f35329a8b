//! COCO skeleton topology handed to renderers alongside detections.

use super::types::{Keypoint, KeypointIndex, PoseDetection};

/// Keypoints scoring below this are not drawn. Independent of the decode
/// confidence threshold.
pub const DISPLAY_CONFIDENCE_THRESHOLD: f32 = 0.3;

pub const RED: [u8; 3] = [255, 0, 0];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];
pub const CYAN: [u8; 3] = [0, 255, 255];
pub const YELLOW: [u8; 3] = [255, 255, 0];
pub const MAGENTA: [u8; 3] = [255, 0, 255];

/// A bone between two keypoints, with its RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub from: KeypointIndex,
    pub to: KeypointIndex,
    pub color: [u8; 3],
}

const fn bone(from: KeypointIndex, to: KeypointIndex, color: [u8; 3]) -> Connection {
    Connection { from, to, color }
}

/// The 16 COCO connections: face, upper body, torso, lower body.
pub static SKELETON: [Connection; 16] = {
    use KeypointIndex::*;
    [
        bone(Nose, LeftEye, RED),
        bone(Nose, RightEye, RED),
        bone(LeftEye, LeftEar, RED),
        bone(RightEye, RightEar, RED),
        bone(LeftShoulder, RightShoulder, GREEN),
        bone(LeftShoulder, LeftElbow, CYAN),
        bone(LeftElbow, LeftWrist, CYAN),
        bone(RightShoulder, RightElbow, YELLOW),
        bone(RightElbow, RightWrist, YELLOW),
        bone(LeftShoulder, LeftHip, GREEN),
        bone(RightShoulder, RightHip, GREEN),
        bone(LeftHip, RightHip, GREEN),
        bone(LeftHip, LeftKnee, MAGENTA),
        bone(LeftKnee, LeftAnkle, MAGENTA),
        bone(RightHip, RightKnee, BLUE),
        bone(RightKnee, RightAnkle, BLUE),
    ]
};

/// Connections whose two endpoints both score at least `threshold`.
pub fn visible_connections(
    pose: &PoseDetection,
    threshold: f32,
) -> impl Iterator<Item = &'static Connection> + '_ {
    SKELETON.iter().filter(move |c| {
        pose.keypoint(c.from).confidence >= threshold && pose.keypoint(c.to).confidence >= threshold
    })
}

/// Keypoints scoring at least `threshold`, with their identity.
pub fn visible_keypoints(
    pose: &PoseDetection,
    threshold: f32,
) -> impl Iterator<Item = (KeypointIndex, &Keypoint)> + '_ {
    KeypointIndex::ALL
        .into_iter()
        .zip(pose.keypoints.iter())
        .filter(move |(_, kp)| kp.confidence >= threshold)
}
