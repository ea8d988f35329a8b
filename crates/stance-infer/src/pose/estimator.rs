use crate::{Backend, InferError, ModelSource, Session};
use stance_base::{Tensor, log};
use stance_image::resize_rgb;

use super::config::PoseConfig;
use super::decode::NUM_CHANNELS;
use super::letterbox::LetterboxInfo;
use super::postprocess::postprocess;
use super::preprocess::preprocess;
use super::types::PoseDetection;

/// YOLO pose estimation pipeline
///
/// Owns the inference session for its whole lifetime; the session and its
/// runtime resources are released when the estimator is dropped, including
/// when construction or a later `estimate()` call fails.
pub struct YoloPoseEstimator {
    session: Box<dyn Session>,
    config: PoseConfig,
}

impl YoloPoseEstimator {
    /// Load `model` with `backend`, using [`PoseConfig::default`].
    pub fn new(model: ModelSource, backend: &dyn Backend) -> Result<Self, InferError> {
        log::info!("loading pose model {:?} with {} backend", model, backend.name());
        let session = backend.load_model(model)?;
        Ok(Self::from_session(session))
    }

    /// Wrap an already loaded session.
    pub fn from_session(session: Box<dyn Session>) -> Self {
        Self {
            session,
            config: PoseConfig::default(),
        }
    }

    /// Replace the whole configuration after validating it.
    pub fn with_config(mut self, config: PoseConfig) -> Result<Self, InferError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Set confidence threshold (builder pattern)
    pub fn with_conf_threshold(mut self, threshold: f32) -> Self {
        self.config.conf_threshold = threshold;
        self
    }

    /// Set IoU threshold for NMS (builder pattern)
    pub fn with_iou_threshold(mut self, threshold: f32) -> Self {
        self.config.iou_threshold = threshold;
        self
    }

    pub fn conf_threshold(&self) -> f32 {
        self.config.conf_threshold
    }

    pub fn iou_threshold(&self) -> f32 {
        self.config.iou_threshold
    }

    pub fn config(&self) -> &PoseConfig {
        &self.config
    }

    /// Run pose estimation on an image
    ///
    /// # Arguments
    /// * `image` - RGB image as `Tensor<u8>` with shape `[H, W, 3]`
    ///
    /// # Returns
    /// Detections in image pixels, sorted by confidence descending. No person
    /// found is an empty vector, not an error.
    pub fn estimate(&mut self, image: &Tensor<u8>) -> Result<Vec<PoseDetection>, InferError> {
        let [height, width] = match image.dims3() {
            Some([h, w, 3]) => [h, w],
            _ => {
                return Err(InferError::InvalidInputShape {
                    expected: "[H, W, 3]".to_string(),
                    got: format!("{:?}", image.shape),
                });
            }
        };

        let letterbox = LetterboxInfo::compute(
            width,
            height,
            self.config.model_width,
            self.config.model_height,
        )?;
        log::debug!(
            "letterbox {}x{} -> {}x{}: scale {}, pad ({}, {})",
            width,
            height,
            letterbox.scaled_width,
            letterbox.scaled_height,
            letterbox.scale,
            letterbox.pad_x,
            letterbox.pad_y
        );

        let resized = if letterbox.scaled_width == 0 || letterbox.scaled_height == 0 {
            Tensor::new(
                vec![letterbox.scaled_height, letterbox.scaled_width, 3],
                Vec::new(),
            )?
        } else {
            resize_rgb(image, letterbox.scaled_width, letterbox.scaled_height)?
        };
        let input = preprocess(&resized, &letterbox, self.config.pad_value)?;

        let input_name = self
            .session
            .input_names()
            .first()
            .ok_or_else(|| InferError::BackendError("model has no inputs".to_string()))?
            .clone();
        let output_name = self.session.output_names().first().cloned();

        let mut outputs = self.session.run(&[(input_name.as_str(), input)])?;
        let output = match output_name.and_then(|name| outputs.remove(&name)) {
            Some(output) => output,
            None => outputs
                .into_values()
                .next()
                .ok_or_else(|| InferError::BackendError("model produced no outputs".to_string()))?,
        };

        let expected = [1, NUM_CHANNELS, self.config.num_detections];
        if output.dims3() != Some(expected) {
            return Err(InferError::InvalidInputShape {
                expected: format!("{expected:?}"),
                got: format!("{:?}", output.shape),
            });
        }

        let detections = postprocess(
            &output,
            &letterbox,
            self.config.conf_threshold,
            self.config.iou_threshold,
        )?;
        log::debug!("estimated {} pose(s)", detections.len());

        Ok(detections)
    }
}
