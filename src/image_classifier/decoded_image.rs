use crate::error::Error;
use image::DynamicImage;
use std::path::Path;

/// A decoded bitmap, alive for a single classification.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub name: String,
    pub image: DynamicImage,
}

impl DecodedImage {
    pub fn open(name: &str, path: &Path) -> Result<Self, Error> {
        let image = image::ImageReader::open(path)
            .map_err(|e| Error::ImageDecode {
                name: name.to_string(),
                source: image::ImageError::IoError(e),
            })?
            .with_guessed_format()
            .map_err(|e| Error::ImageDecode {
                name: name.to_string(),
                source: image::ImageError::IoError(e),
            })?
            .decode()
            .map_err(|source| Error::ImageDecode {
                name: name.to_string(),
                source,
            })?;

        Ok(Self {
            name: name.to_string(),
            image,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Size of the RGBA8 buffer the image occupies on screen.
    pub fn byte_size(&self) -> u64 {
        self.width() as u64 * self.height() as u64 * 4
    }
}
