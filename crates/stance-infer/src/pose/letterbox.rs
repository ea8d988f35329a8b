use crate::InferError;
use stance_base::Vec2;

/// Mapping between a source image and the square model input.
///
/// The source is scaled uniformly to fit and centered; padding uses integer
/// division, so an odd leftover pixel ends up on the right/bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterboxInfo {
    /// `min(model_width / source_width, model_height / source_height)`
    pub scale: f32,
    /// Horizontal padding added (in pixels)
    pub pad_x: f32,
    /// Vertical padding added (in pixels)
    pub pad_y: f32,
    pub scaled_width: usize,
    pub scaled_height: usize,
    pub source_width: usize,
    pub source_height: usize,
    pub model_width: usize,
    pub model_height: usize,
}

impl LetterboxInfo {
    /// Compute the letterbox for a `source_width` x `source_height` image fed to
    /// a `model_width` x `model_height` input.
    ///
    /// Returns `InferError::DegenerateGeometry` when any dimension is zero.
    pub fn compute(
        source_width: usize,
        source_height: usize,
        model_width: usize,
        model_height: usize,
    ) -> Result<Self, InferError> {
        if source_width == 0 || source_height == 0 || model_width == 0 || model_height == 0 {
            return Err(InferError::DegenerateGeometry(format!(
                "source {source_width}x{source_height}, model {model_width}x{model_height}"
            )));
        }

        let scale = (model_width as f32 / source_width as f32)
            .min(model_height as f32 / source_height as f32);
        if !(scale > 0.0) || !scale.is_finite() {
            return Err(InferError::DegenerateGeometry(format!("scale {scale}")));
        }

        // Truncation is floor here: both operands are positive.
        let scaled_width = ((source_width as f32 * scale) as usize).min(model_width);
        let scaled_height = ((source_height as f32 * scale) as usize).min(model_height);
        let pad_x = (model_width - scaled_width) / 2;
        let pad_y = (model_height - scaled_height) / 2;

        Ok(Self {
            scale,
            pad_x: pad_x as f32,
            pad_y: pad_y as f32,
            scaled_width,
            scaled_height,
            source_width,
            source_height,
            model_width,
            model_height,
        })
    }

    /// Check a letterbox built by hand: the scale must be positive and finite.
    pub fn validate(&self) -> Result<(), InferError> {
        if !(self.scale > 0.0) || !self.scale.is_finite() {
            return Err(InferError::DegenerateGeometry(format!("scale {}", self.scale)));
        }
        Ok(())
    }

    pub fn padding(&self) -> Vec2<f32> {
        Vec2::new(self.pad_x, self.pad_y)
    }

    pub fn source_size(&self) -> Vec2<f32> {
        Vec2::new(self.source_width as f32, self.source_height as f32)
    }

    /// Model-space point to source-image point.
    pub fn to_source(&self, model: Vec2<f32>) -> Vec2<f32> {
        (model - self.padding()) / self.scale
    }

    /// Source-image point to model-space point.
    pub fn to_model(&self, source: Vec2<f32>) -> Vec2<f32> {
        source * self.scale + self.padding()
    }
}
