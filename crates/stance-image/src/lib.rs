//! Image source for the pose pipeline.
//!
//! Wraps the `image` crate to turn encoded bytes into 8-bit RGB tensors and to
//! resize them to the letterboxed size. All tensors use HWC layout:
//! `[height, width, 3]`.

pub mod error;

pub use error::ImageError;

use crates_image::{RgbImage, imageops::FilterType};
use stance_base::Tensor;

/// Decode an encoded image (JPEG, PNG, ...) into an RGB tensor.
///
/// Grayscale, alpha and 16-bit inputs are converted to 8-bit RGB; alpha is
/// dropped.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub fn decode_rgb(data: &[u8]) -> Result<Tensor<u8>, ImageError> {
    let rgb = crates_image::load_from_memory(data)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Tensor::new(
        vec![height as usize, width as usize, 3],
        rgb.into_raw(),
    )?)
}

/// Width and height of an HWC RGB tensor.
pub fn rgb_dimensions(image: &Tensor<u8>) -> Result<(usize, usize), ImageError> {
    match image.dims3() {
        Some([h, w, 3]) => Ok((w, h)),
        _ => Err(ImageError::Resize(format!(
            "expected [H, W, 3] tensor, got {:?}",
            image.shape
        ))),
    }
}

/// Resize an RGB tensor to `width` x `height` with bilinear filtering.
pub fn resize_rgb(image: &Tensor<u8>, width: usize, height: usize) -> Result<Tensor<u8>, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::Resize(format!(
            "target size {width}x{height} has zero area"
        )));
    }
    let (src_w, src_h) = rgb_dimensions(image)?;
    if (src_w, src_h) == (width, height) {
        return Ok(image.clone());
    }

    let to_u32 = |v: usize| {
        u32::try_from(v).map_err(|_| ImageError::Resize(format!("dimension {v} exceeds u32")))
    };
    let src = RgbImage::from_raw(to_u32(src_w)?, to_u32(src_h)?, image.data.clone())
        .ok_or_else(|| ImageError::Resize("pixel buffer smaller than dimensions".to_string()))?;
    let resized = crates_image::imageops::resize(&src, to_u32(width)?, to_u32(height)?, FilterType::Triangle);

    Ok(Tensor::new(vec![height, width, 3], resized.into_raw())?)
}
