use crate::config::Normalization;
use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

pub fn resize_image(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if image.width() == width && image.height() == height {
        image.clone()
    } else {
        image.resize_exact(width, height, imageops::FilterType::Triangle)
    }
}

/// NCHW tensor with every channel mapped to `(pixel / 255 - mean) / std`.
pub fn image_to_tensor(image: &DynamicImage, normalization: &Normalization) -> Tensor {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        let pixel = rgb.get_pixel(x as u32, y as u32);
        (pixel[c] as f32 / 255.0 - normalization.mean[c]) / normalization.std[c]
    })
    .into_tensor()
}

pub fn resize_image_to_tensor(
    image: &DynamicImage,
    width: u32,
    height: u32,
    normalization: &Normalization,
) -> Tensor {
    let resized = resize_image(image, width, height);
    image_to_tensor(&resized, normalization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, Rgb};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn test_image_to_tensor_shape() {
        let image = solid(100, 60, [255, 0, 0]);

        let tensor = resize_image_to_tensor(&image, 224, 224, &Normalization::TORCHVISION);

        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);
    }

    #[test]
    fn test_image_to_tensor_normalization() {
        let n = Normalization::TORCHVISION;
        let image = solid(10, 10, [255, 0, 128]);

        let tensor = resize_image_to_tensor(&image, 10, 10, &n);
        let slice = tensor.as_slice::<f32>().unwrap();

        let red = (1.0 - n.mean[0]) / n.std[0];
        let green = (0.0 - n.mean[1]) / n.std[1];
        let blue = (128.0 / 255.0 - n.mean[2]) / n.std[2];

        assert!((slice[0] - red).abs() < 1e-4);
        assert!((slice[100] - green).abs() < 1e-4);
        assert!((slice[200] - blue).abs() < 1e-4);
    }

    #[test]
    fn test_identity_normalization_keeps_unit_range() {
        let identity = Normalization {
            mean: [0.0; 3],
            std: [1.0; 3],
        };
        let image = solid(4, 4, [128, 128, 128]);

        let tensor = image_to_tensor(&image, &identity);
        let slice = tensor.as_slice::<f32>().unwrap();

        let expected = 128.0 / 255.0;
        assert!(slice.iter().all(|v| (v - expected).abs() < 1e-4));
    }
}
