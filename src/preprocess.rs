use image::imageops::FilterType;
use ndarray::{Array, Ix4};
use thiserror::Error;

/// Spatial resolution the classifier was trained on.
pub const INPUT_SIZE: u32 = 224;

#[derive(Error, Debug)]
#[error("failed to decode image: {0}")]
pub struct DecodeError(String);

/// Decodes an uploaded image and turns it into the model's input tensor:
/// RGB, bilinear-resized to 224x224, NHWC with a batch dimension of 1.
/// Pixel values are carried as raw f32 in 0..=255.
pub fn image_to_tensor(image_data: &[u8]) -> Result<Array<f32, Ix4>, DecodeError> {
    let image_reader = image::ImageReader::new(std::io::Cursor::new(image_data))
        .with_guessed_format()
        .map_err(|e| DecodeError(e.to_string()))?;

    let original_img = image_reader
        .decode()
        .map_err(|e| DecodeError(e.to_string()))?;

    let img = original_img.resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);
    let rgb = img.to_rgb8();

    let size = INPUT_SIZE as usize;
    let mut input = Array::zeros((1, size, size, 3));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let x = x as usize;
        let y = y as usize;
        let [r, g, b] = pixel.0;
        input[[0, y, x, 0]] = r as f32;
        input[[0, y, x, 1]] = g as f32;
        input[[0, y, x, 2]] = b as f32;
    }

    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn png_of_any_dimension_yields_batched_224_tensor() {
        for (w, h) in [(1, 1), (13, 57), (640, 480), (300, 300)] {
            let tensor = image_to_tensor(&encode(w, h, ImageFormat::Png)).unwrap();
            assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        }
    }

    #[test]
    fn jpeg_yields_batched_224_tensor() {
        let tensor = image_to_tensor(&encode(100, 50, ImageFormat::Jpeg)).unwrap();
        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
    }

    #[test]
    fn pixel_values_stay_in_byte_range() {
        let tensor = image_to_tensor(&encode(32, 32, ImageFormat::Png)).unwrap();
        assert!(tensor.iter().all(|&v| (0.0..=255.0).contains(&v)));
    }

    #[test]
    fn garbage_bytes_fail_with_decode_error() {
        let result = image_to_tensor(b"definitely not an image");
        assert!(result.is_err());
    }
}
