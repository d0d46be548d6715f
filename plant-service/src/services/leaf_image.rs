//! Decoding of uploaded images.

use crate::services::providers::InlineImage;
use image::{DynamicImage, ImageError, ImageFormat};
use std::io::Cursor;

/// Formats the model accepts as inline data.
fn is_inline_format(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP)
}

/// Check that an upload decodes and prepare it for the model.
///
/// Format detection is content-based; the client-supplied filename and
/// content type are not trusted. PNG, JPEG and WebP uploads are forwarded
/// byte for byte. Any other decodable format is re-encoded as JPEG.
pub fn decode_upload(bytes: &[u8]) -> Result<InlineImage, ImageError> {
    let format = image::guess_format(bytes)?;
    let decoded = image::load_from_memory_with_format(bytes, format)?;

    if is_inline_format(format) {
        return Ok(InlineImage {
            mime_type: format.to_mime_type().to_string(),
            data: bytes.to_vec(),
        });
    }

    tracing::debug!(?format, "Re-encoding upload as JPEG");

    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
    let mut jpeg = Cursor::new(Vec::new());
    rgb.write_to(&mut jpeg, ImageFormat::Jpeg)?;

    Ok(InlineImage {
        mime_type: ImageFormat::Jpeg.to_mime_type().to_string(),
        data: jpeg.into_inner(),
    })
}
