use crate::InferError;
use stance_base::Tensor;

use super::decode::decode_tensor;
use super::letterbox::LetterboxInfo;
use super::nms::non_max_suppression;
use super::types::PoseDetection;

/// Post-process YOLO pose model output
///
/// Decodes a raw `[1, 56, N]` output tensor, drops detections below
/// `conf_threshold` and runs NMS at `iou_threshold`.
///
/// # Returns
/// Detections in source-image pixels sorted by confidence descending, or
/// `InferError::InvalidInputShape` if the tensor has an unexpected shape.
/// An empty vector is a valid result.
pub fn postprocess(
    output: &Tensor<f32>,
    letterbox: &LetterboxInfo,
    conf_threshold: f32,
    iou_threshold: f32,
) -> Result<Vec<PoseDetection>, InferError> {
    let candidates = decode_tensor(output, letterbox, conf_threshold)?;
    Ok(non_max_suppression(candidates, iou_threshold)
        .into_iter()
        .map(|candidate| candidate.pose)
        .collect())
}
