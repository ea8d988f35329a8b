use crate::InferError;
use stance_base::{Rect, Tensor, Vec2, log};

use super::letterbox::LetterboxInfo;
use super::types::{DetectionCandidate, Keypoint, PoseDetection, COCO_KEYPOINT_COUNT};

/// Channels per detection: 4 box + 1 confidence + 17 * (x, y, confidence).
pub const NUM_CHANNELS: usize = 5 + COCO_KEYPOINT_COUNT * 3;
/// Detection slots produced by a 640x640 YOLO pose head.
pub const DEFAULT_NUM_DETECTIONS: usize = 8400;

const CONFIDENCE_CHANNEL: usize = 4;
const KEYPOINT_BASE_CHANNEL: usize = 5;

/// Channel-major view over a raw `[56, N]` output; no transposed copy.
struct RawOutput<'a> {
    data: &'a [f32],
    num_detections: usize,
}

impl RawOutput<'_> {
    fn at(&self, channel: usize, slot: usize) -> f32 {
        self.data[channel * self.num_detections + slot]
    }
}

/// Decode the flat channel-major output of a YOLO pose head.
///
/// `raw` must hold exactly `56 * num_detections` values, where the value for
/// channel `c` of slot `i` sits at `c * num_detections + i`. Slots whose
/// confidence is below `conf_threshold` (or NaN) are dropped; the rest are
/// mapped back to source-image pixels and returned in slot order.
///
/// # Errors
/// `InferError::DegenerateGeometry` if the letterbox scale is not positive,
/// `InferError::InvalidInputShape` if `raw` has the wrong length.
pub fn decode(
    raw: &[f32],
    num_detections: usize,
    letterbox: &LetterboxInfo,
    conf_threshold: f32,
) -> Result<Vec<DetectionCandidate>, InferError> {
    letterbox.validate()?;

    let expected = NUM_CHANNELS.checked_mul(num_detections);
    if expected != Some(raw.len()) {
        return Err(InferError::InvalidInputShape {
            expected: format!("{NUM_CHANNELS} * {num_detections} values"),
            got: format!("{} values", raw.len()),
        });
    }

    let output = RawOutput {
        data: raw,
        num_detections,
    };

    let candidates: Vec<DetectionCandidate> = (0..num_detections)
        // NaN scores fail the comparison and are dropped rather than kept;
        // kept, they would rank above every real score in NMS.
        .filter(|&slot| output.at(CONFIDENCE_CHANNEL, slot) >= conf_threshold)
        .map(|slot| DetectionCandidate {
            pose: decode_slot(&output, slot, letterbox),
            slot,
        })
        .collect();

    log::debug!(
        "decoded {} of {} slots at confidence >= {}",
        candidates.len(),
        num_detections,
        conf_threshold
    );

    Ok(candidates)
}

/// Decode a `[1, 56, N]` output tensor. See [`decode`].
pub fn decode_tensor(
    output: &Tensor<f32>,
    letterbox: &LetterboxInfo,
    conf_threshold: f32,
) -> Result<Vec<DetectionCandidate>, InferError> {
    match output.dims3() {
        Some([1, NUM_CHANNELS, n]) => decode(&output.data, n, letterbox, conf_threshold),
        _ => Err(InferError::InvalidInputShape {
            expected: format!("[1, {NUM_CHANNELS}, N]"),
            got: format!("{:?}", output.shape),
        }),
    }
}

fn decode_slot(output: &RawOutput<'_>, slot: usize, letterbox: &LetterboxInfo) -> PoseDetection {
    let source = letterbox.source_size();

    let size = Vec2::new(output.at(2, slot), output.at(3, slot)) / letterbox.scale;
    let center = letterbox.to_source(Vec2::new(output.at(0, slot), output.at(1, slot)));
    let bbox = Rect::from_center(center, size);
    // Upper bound is `source - size`, which goes negative for boxes wider than
    // the image; the origin then collapses to 0 and the size is kept. A NaN
    // coordinate lands on the upper bound instead of passing through.
    let origin = bbox.origin.clamp_each(Vec2::zero(), source - size);

    let keypoints = std::array::from_fn(|k| {
        let base = KEYPOINT_BASE_CHANNEL + k * 3;
        let model = Vec2::new(output.at(base, slot), output.at(base + 1, slot));
        Keypoint {
            position: letterbox.to_source(model).clamp_each(Vec2::zero(), source),
            confidence: output.at(base + 2, slot),
        }
    });

    PoseDetection {
        bbox: Rect::new(origin, size),
        confidence: output.at(CONFIDENCE_CHANNEL, slot),
        keypoints,
    }
}
