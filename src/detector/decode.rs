use crate::{Error, Result};
use image::DynamicImage;

/// Maximum accepted image payload (10MB).
const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Decode raw image bytes from an upload. Format is detected from the
/// content; empty, oversized, or undecodable payloads are errors.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(Error::detection("image data is empty"));
    }

    if bytes.len() > MAX_IMAGE_SIZE {
        return Err(Error::detection(format!(
            "image data is too large: {} bytes (max: {} bytes)",
            bytes.len(),
            MAX_IMAGE_SIZE
        )));
    }

    Ok(image::load_from_memory(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_is_rejected() {
        let result = decode_image_bytes(&[]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty"));
    }

    #[test]
    fn test_garbage_payload_is_rejected() {
        let result = decode_image_bytes(b"definitely not an image");
        assert!(result.is_err());
    }

    #[test]
    fn test_png_round_trip() {
        let mut buf = std::io::Cursor::new(Vec::new());
        let img = DynamicImage::new_rgb8(4, 4);
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();

        let decoded = decode_image_bytes(buf.get_ref()).unwrap();
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 4);
    }
}
