use crate::InferError;
use stance_base::Tensor;

use super::letterbox::LetterboxInfo;

/// Embed a resized image into the letterboxed model input.
///
/// `resized` is HWC with shape `[scaled_height, scaled_width, C]`, `C >= 3`;
/// the first three channels are read as R, G, B and any alpha is ignored.
/// Returns an NCHW tensor `[1, 3, model_height, model_width]` where padding
/// holds `pad_value` and image pixels are rescaled from [0, 255] to [0, 1].
pub fn preprocess(
    resized: &Tensor<u8>,
    letterbox: &LetterboxInfo,
    pad_value: f32,
) -> Result<Tensor<f32>, InferError> {
    let (h, w, c) = match resized.dims3() {
        Some([h, w, c]) if c >= 3 => (h, w, c),
        _ => {
            return Err(InferError::InvalidInputShape {
                expected: "[H, W, C] with C >= 3".to_string(),
                got: format!("{:?}", resized.shape),
            });
        }
    };
    if (w, h) != (letterbox.scaled_width, letterbox.scaled_height) {
        return Err(InferError::InvalidInputShape {
            expected: format!("{}x{} image", letterbox.scaled_width, letterbox.scaled_height),
            got: format!("{w}x{h} image"),
        });
    }

    let (mw, mh) = (letterbox.model_width, letterbox.model_height);
    let pad_x = letterbox.pad_x as usize;
    let pad_y = letterbox.pad_y as usize;
    if pad_x.checked_add(w).is_none_or(|end| end > mw)
        || pad_y.checked_add(h).is_none_or(|end| end > mh)
    {
        return Err(InferError::InvalidInputShape {
            expected: format!("content within {mw}x{mh} model input"),
            got: format!("{w}x{h} image at offset ({pad_x}, {pad_y})"),
        });
    }

    let mut input = Tensor::filled(vec![1, 3, mh, mw], pad_value)?;
    let plane = mw * mh;
    if w == 0 || h == 0 {
        // Extreme aspect ratios can scale one side down to nothing.
        return Ok(input);
    }
    for (y, row) in resized.data.chunks_exact(w * c).take(h).enumerate() {
        let dst_row = (y + pad_y) * mw + pad_x;
        for (x, pixel) in row.chunks_exact(c).enumerate() {
            for (ch, &value) in pixel[..3].iter().enumerate() {
                if let Some(dst) = input.data.get_mut(ch * plane + dst_row + x) {
                    *dst = f32::from(value) / 255.0;
                }
            }
        }
    }

    Ok(input)
}
