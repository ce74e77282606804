use crate::dataset::common_structs::ImageTensor;
use crate::dataset::error::DatasetError;
use image::{DynamicImage, FilterType};
use std::path::Path;

/// Decodes the image at `path` and resizes it to `size` x `size` pixels.
/// The resize does not preserve aspect ratio, non-square sources get
/// distorted.
pub fn load_and_resize(path: &Path, size: u32) -> Result<DynamicImage, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::missing(path));
    }
    let img = image::open(path).map_err(|e| DatasetError::malformed(path, e))?;
    Ok(img.resize_exact(size, size, FilterType::Nearest))
}

/// Converts an image to an RGB float buffer with pixel values scaled from
/// [0, 255] to [0, 1]. No mean/std normalization.
pub fn to_unit_float(img: &DynamicImage) -> ImageTensor {
    let rgb = img.to_rgb();
    let (width, height) = rgb.dimensions();
    let data = rgb
        .into_raw()
        .into_iter()
        .map(|value| f32::from(value) / 255.)
        .collect();
    ImageTensor {
        data,
        width,
        height,
        channels: 3,
    }
}
