use crate::InferError;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::decode::DEFAULT_NUM_DETECTIONS;

/// Pipeline parameters for YOLO pose estimation.
///
/// Missing fields in a JSON config fall back to [`PoseConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseConfig {
    /// Model input width in pixels.
    pub model_width: usize,
    /// Model input height in pixels.
    pub model_height: usize,
    /// Detection slots in the model output (`N` in `[1, 56, N]`).
    pub num_detections: usize,
    /// Minimum person confidence kept by the decoder.
    pub conf_threshold: f32,
    /// Overlap above which NMS suppresses the weaker detection.
    pub iou_threshold: f32,
    /// Value written to letterbox padding, in normalized [0, 1] units.
    pub pad_value: f32,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            model_width: 640,
            model_height: 640,
            num_detections: DEFAULT_NUM_DETECTIONS,
            conf_threshold: 0.25,
            iou_threshold: 0.45,
            pad_value: 0.0,
        }
    }
}

impl PoseConfig {
    pub fn with_model_size(mut self, width: usize, height: usize) -> Self {
        self.model_width = width;
        self.model_height = height;
        self
    }

    pub fn with_num_detections(mut self, num_detections: usize) -> Self {
        self.num_detections = num_detections;
        self
    }

    pub fn with_conf_threshold(mut self, threshold: f32) -> Self {
        self.conf_threshold = threshold;
        self
    }

    pub fn with_iou_threshold(mut self, threshold: f32) -> Self {
        self.iou_threshold = threshold;
        self
    }

    pub fn with_pad_value(mut self, value: f32) -> Self {
        self.pad_value = value;
        self
    }

    pub fn validate(&self) -> Result<(), InferError> {
        if self.model_width == 0 || self.model_height == 0 {
            return Err(InferError::InvalidConfig(format!(
                "model size {}x{} must be positive",
                self.model_width, self.model_height
            )));
        }
        if self.num_detections == 0 {
            return Err(InferError::InvalidConfig(
                "num_detections must be positive".to_string(),
            ));
        }
        if !self.conf_threshold.is_finite() {
            return Err(InferError::InvalidConfig(format!(
                "conf_threshold {} is not finite",
                self.conf_threshold
            )));
        }
        if !self.iou_threshold.is_finite() {
            return Err(InferError::InvalidConfig(format!(
                "iou_threshold {} is not finite",
                self.iou_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.pad_value) {
            return Err(InferError::InvalidConfig(format!(
                "pad_value {} outside [0, 1]",
                self.pad_value
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, InferError> {
        let config: PoseConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InferError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
