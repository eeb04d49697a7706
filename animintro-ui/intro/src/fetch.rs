use std::fmt;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::error::Result;

/// Longest edge kept after downscaling the fetched picture.
const MAX_IMAGE_EDGE: u32 = 1280;
const JPEG_QUALITY: u8 = 80;

/// Picture fetched for the title mask, re-encoded as JPEG.
#[derive(Clone)]
pub struct RemoteImage {
    width: u32,
    height: u32,
    data_url: Arc<str>,
}

impl RemoteImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `data:` URL with the JPEG payload, ready to embed in SVG.
    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}

impl fmt::Debug for RemoteImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_url_len", &self.data_url.len())
            .finish()
    }
}

/// Download the picture at `url` and prepare it for masking.
pub async fn fetch_image(url: String) -> Result<RemoteImage> {
    log::debug!("fetching intro image from {url}");
    let bytes = reqwest::get(&url)
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    let image =
        tokio::task::spawn_blocking(move || prepare_image(&bytes)).await??;
    log::info!(
        "intro image ready: {}x{} from {url}",
        image.width,
        image.height
    );

    Ok(image)
}

/// Decode raw PNG/JPEG bytes, downscale and re-encode them as a JPEG data
/// URL.
///
/// The payload is embedded in every title frame, so it is kept small.
pub fn prepare_image(bytes: &[u8]) -> Result<RemoteImage> {
    let decoded = image::load_from_memory(bytes)?;
    let resized = downscale(decoded).into_rgb8();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode_image(&resized)?;

    let data_url =
        format!("data:image/jpeg;base64,{}", STANDARD.encode(&jpeg));

    Ok(RemoteImage {
        width: resized.width(),
        height: resized.height(),
        data_url: Arc::from(data_url),
    })
}

fn downscale(image: DynamicImage) -> DynamicImage {
    if image.width().max(image.height()) <= MAX_IMAGE_EDGE {
        return image;
    }

    image.resize(MAX_IMAGE_EDGE, MAX_IMAGE_EDGE, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgb, RgbImage};

    use super::*;
    use crate::error::IntroError;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbImage::from_pixel(width, height, Rgb([10, 120, 200]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("png encode");
        bytes
    }

    #[test]
    fn given_small_png_when_preparing_then_keeps_dimensions() {
        let image = prepare_image(&png_bytes(40, 20)).expect("prepared");

        assert_eq!((image.width(), image.height()), (40, 20));
        assert!(image.data_url().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn given_large_image_when_preparing_then_longest_edge_is_capped() {
        let image = prepare_image(&png_bytes(3872, 2592)).expect("prepared");

        assert_eq!(image.width(), MAX_IMAGE_EDGE);
        assert!(image.height() < MAX_IMAGE_EDGE);
        assert!(image.height() > 800);
        assert!(image.data_url().len() < 1_000_000);
    }

    #[test]
    fn given_garbage_bytes_when_preparing_then_decode_error() {
        let err = prepare_image(b"definitely not an image").unwrap_err();

        assert!(matches!(err, IntroError::Decode(_)));
    }
}
