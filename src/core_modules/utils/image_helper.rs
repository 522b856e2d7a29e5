// Loader and saver adapters between `Picture` and files on disk, backed by
// the `image` crate. Only 8-bit RGB and 8-bit luminance sources are accepted;
// luminance is expanded to R = G = B. Anything else is refused rather than
// converted.

pub mod image_helper {
    use crate::core_modules::picture::Picture;
    use crate::error::{Error, Result};
    use image::{DynamicImage, ImageEncoder};
    use std::fs::File;
    use std::io::BufWriter;
    use std::path::Path;
    use tracing::{debug, instrument};

    fn to_u32(width: usize, height: usize) -> Result<(u32, u32)> {
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => Ok((w, h)),
            _ => Err(Error::InvalidDimensions { width, height }),
        }
    }

    /// Converts a decoded image into a picture.
    pub fn from_dynamic(image: DynamicImage, path: &Path) -> Result<Picture> {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let bytes = match image {
            DynamicImage::ImageRgb8(buffer) => buffer.into_raw(),
            DynamicImage::ImageLuma8(buffer) => buffer
                .into_raw()
                .into_iter()
                .flat_map(|luma| [luma, luma, luma])
                .collect(),
            other => {
                return Err(Error::UnsupportedColorMode {
                    path: path.to_path_buf(),
                    mode: format!("{:?}", other.color()),
                });
            }
        };
        Picture::from_rgb_bytes(width, height, &bytes)
    }

    /// Decodes the file at `path`. The file name becomes the picture title.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Picture> {
        let path = path.as_ref();
        let image = image::open(path)?;
        let mut picture = from_dynamic(image, path)?;
        if let Some(name) = path.file_name() {
            picture.set_title(name.to_string_lossy());
        }
        debug!(width = picture.width(), height = picture.height(), "loaded picture");
        Ok(picture)
    }

    /// Encodes the picture as 8-bit RGB; the format follows the file extension.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(picture: &Picture, path: impl AsRef<Path>) -> Result<()> {
        let (width, height) = to_u32(picture.width(), picture.height())?;
        image::save_buffer(
            path.as_ref(),
            &picture.to_rgb_bytes(),
            width,
            height,
            image::ExtendedColorType::Rgb8,
        )?;
        debug!(width, height, "saved picture");
        Ok(())
    }

    /// Encodes the picture as PNG regardless of the file extension.
    pub fn save_png(picture: &Picture, path: impl AsRef<Path>) -> Result<()> {
        let (width, height) = to_u32(picture.width(), picture.height())?;
        let output = BufWriter::new(File::create(path)?);
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(
            &picture.to_rgb_bytes(),
            width,
            height,
            image::ExtendedColorType::Rgb8,
        )?;

        Ok(())
    }
}
