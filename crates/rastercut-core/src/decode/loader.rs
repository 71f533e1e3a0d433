//! Encoded-bytes decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};

use super::{DecodeError, Orientation, SourceImage};

/// Decode encoded image bytes into a [`SourceImage`], applying EXIF
/// orientation correction.
///
/// The format is guessed from the leading bytes. Files are expected to have
/// been type/size checked by the caller; anything the decoder cannot read is
/// reported as a [`DecodeError`].
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a supported format.
/// Returns `DecodeError::CorruptedFile` if the data is truncated or malformed.
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    let oriented = apply_orientation(img, orientation);
    SourceImage::from_rgba_image(oriented.into_rgba8())
}

/// Decode encoded image bytes without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let img = decode_dynamic(bytes)?;
    SourceImage::from_rgba_image(img.into_rgba8())
}

/// Read the EXIF orientation tag from encoded bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })
}

/// Returns `Orientation::Normal` if no EXIF data is found.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(e) => {
            log::trace!("no EXIF orientation: {e}");
            Orientation::Normal
        }
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
            .unwrap();
        out
    }

    /// JPEG with an APP1 segment whose IFD0 holds only the orientation tag.
    fn jpeg_with_orientation(img: &RgbImage, orientation: u16) -> Vec<u8> {
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, 95)
            .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
            .unwrap();

        // Little-endian TIFF header, IFD0 at offset 8 with one SHORT entry.
        let mut tiff = vec![b'I', b'I', 42, 0, 8, 0, 0, 0];
        tiff.extend_from_slice(&1u16.to_le_bytes());
        tiff.extend_from_slice(&0x0112u16.to_le_bytes());
        tiff.extend_from_slice(&3u16.to_le_bytes());
        tiff.extend_from_slice(&1u32.to_le_bytes());
        tiff.extend_from_slice(&orientation.to_le_bytes());
        tiff.extend_from_slice(&[0, 0]);
        tiff.extend_from_slice(&0u32.to_le_bytes());

        let mut app1 = b"Exif\0\0".to_vec();
        app1.extend_from_slice(&tiff);
        let len = u16::try_from(app1.len() + 2).unwrap();

        // SOI, then APP1, then the rest of the encoder output.
        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(&app1);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    /// 16x8 image: left half red, right half blue.
    fn split_image() -> RgbImage {
        RgbImage::from_fn(16, 8, |x, _| {
            if x < 8 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        })
    }

    /// 2x1 image: red then blue.
    fn two_pixel_image() -> RgbaImage {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 255, 128]));
        img
    }

    #[test]
    fn test_decode_valid_png() {
        let bytes = png_bytes(&two_pixel_image());
        let decoded = decode_image(&bytes).unwrap();

        assert_eq!(decoded.dimensions(), (2, 1));
        assert_eq!(decoded.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(decoded.pixel(1, 0), [0, 0, 255, 128]);
    }

    #[test]
    fn test_decode_no_orientation_matches_for_plain_png() {
        let bytes = png_bytes(&two_pixel_image());
        assert_eq!(
            decode_image(&bytes).unwrap(),
            decode_image_no_orientation(&bytes).unwrap()
        );
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05]);
        assert_eq!(result.unwrap_err(), DecodeError::InvalidFormat);
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert_eq!(decode_image(&[]).unwrap_err(), DecodeError::InvalidFormat);
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(&two_pixel_image());
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(
            decode_image(truncated),
            Err(DecodeError::CorruptedFile(_))
        ));
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        let bytes = png_bytes(&two_pixel_image());
        assert_eq!(get_orientation(&bytes), Orientation::Normal);
    }

    #[test]
    fn test_decode_jpeg_applies_exif_rotation() {
        let bytes = jpeg_with_orientation(&split_image(), 6);
        assert_eq!(get_orientation(&bytes), Orientation::Rotate90CW);

        let raw = decode_image_no_orientation(&bytes).unwrap();
        assert_eq!(raw.dimensions(), (16, 8));

        let oriented = decode_image(&bytes).unwrap();
        assert_eq!(oriented.dimensions(), (8, 16));

        // Clockwise: source (x, y) lands at (7 - y, x). Left half (red)
        // ends up on top, right half (blue) at the bottom.
        let top = oriented.pixel(3, 1);
        let bottom = oriented.pixel(3, 14);
        assert!(i32::from(top[0]) > i32::from(top[2]) + 100, "top {top:?}");
        assert!(i32::from(bottom[2]) > i32::from(bottom[0]) + 100, "bottom {bottom:?}");
        assert_eq!(top[3], 255);
    }

    #[test]
    fn test_decode_jpeg_normal_orientation_untouched() {
        let bytes = jpeg_with_orientation(&split_image(), 1);
        assert_eq!(get_orientation(&bytes), Orientation::Normal);
        assert_eq!(decode_image(&bytes).unwrap().dimensions(), (16, 8));
    }

    #[test]
    fn test_orientation_extraction_invalid_data() {
        assert_eq!(get_orientation(&[1, 2, 3]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let img = DynamicImage::ImageRgba8(two_pixel_image());
        let rotated = apply_orientation(img, Orientation::Rotate90CW).into_rgba8();

        assert_eq!(rotated.dimensions(), (1, 2));
        assert_eq!(rotated.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(rotated.get_pixel(0, 1), &Rgba([0, 0, 255, 128]));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let img = DynamicImage::ImageRgba8(two_pixel_image());
        let flipped = apply_orientation(img, Orientation::FlipHorizontal).into_rgba8();

        assert_eq!(flipped.get_pixel(0, 0), &Rgba([0, 0, 255, 128]));
        assert_eq!(flipped.get_pixel(1, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_apply_orientation_normal_is_identity() {
        let img = DynamicImage::ImageRgba8(two_pixel_image());
        let same = apply_orientation(img, Orientation::Normal).into_rgba8();
        assert_eq!(same, two_pixel_image());
    }
}
