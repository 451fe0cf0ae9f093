use fw_core::error::{AppError, Result};
use image::imageops::FilterType;
use image::ImageReader;
use std::path::Path;
use tract_onnx::prelude::tract_ndarray::Array4;

/// Side length of the square model input.
pub const INPUT_SIZE: u32 = 224;

/// Loads an image and packs it as a (1, 224, 224, 3) batch with values in [0, 1].
///
/// Nearest-neighbour resampling and RGB channel order match how the network
/// was fed during training.
pub fn preprocess_image(path: &Path) -> Result<Array4<f32>> {
    let img = ImageReader::open(path)
        .map_err(|e| AppError::Decode(format!("{}: {e}", path.display())))?
        .with_guessed_format()
        .map_err(|e| AppError::Decode(format!("{}: {e}", path.display())))?
        .decode()
        .map_err(|e| AppError::Decode(format!("{}: {e}", path.display())))?;

    let resized = img
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Nearest)
        .to_rgb8();

    let size = INPUT_SIZE as usize;
    let mut batch = Array4::<f32>::zeros((1, size, size, 3));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..3 {
            batch[[0, y as usize, x as usize, c]] = pixel[c] as f32 / 255.0;
        }
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn output_is_a_normalized_single_item_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        RgbImage::from_fn(640, 480, |x, _| if x < 320 { Rgb([255, 0, 51]) } else { Rgb([0, 0, 0]) })
            .save(&path)
            .unwrap();

        let batch = preprocess_image(&path).unwrap();
        assert_eq!(batch.shape(), &[1, 224, 224, 3]);
        assert!(batch.iter().all(|v| (0.0..=1.0).contains(v)));

        assert_eq!(batch[[0, 10, 0, 0]], 1.0);
        assert_eq!(batch[[0, 10, 0, 1]], 0.0);
        assert!((batch[[0, 10, 0, 2]] - 0.2).abs() < 1e-6);
        assert_eq!(batch[[0, 10, 223, 0]], 0.0);
    }

    #[test]
    fn alpha_channel_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        RgbaImage::from_pixel(32, 32, Rgba([10, 20, 30, 0])).save(&path).unwrap();

        let batch = preprocess_image(&path).unwrap();
        assert_eq!(batch.shape(), &[1, 224, 224, 3]);
        assert!((batch[[0, 0, 0, 2]] - 30.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn unreadable_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.jpg");
        std::fs::write(&path, b"plain text").unwrap();

        assert!(matches!(preprocess_image(&path), Err(AppError::Decode(_))));
        assert!(matches!(preprocess_image(&dir.path().join("missing.png")), Err(AppError::Decode(_))));
    }
}
