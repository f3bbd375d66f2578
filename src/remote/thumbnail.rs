use image::{imageops::FilterType, DynamicImage, RgbaImage};
use iced::widget::image::Handle;
use reqwest::Client;

use super::{fetch_bytes, FetchError};

/// Download a gallery image and shrink it for its tile.
/// Decoding and resizing run on a blocking worker to keep the UI responsive.
pub async fn fetch_thumbnail(http: Client, url: String, size: u32) -> Result<Handle, String> {
    let bytes = fetch_bytes(&http, &url)
        .await
        .map_err(|e| e.to_string())?;

    let thumbnail = tokio::task::spawn_blocking(move || make_thumbnail(&bytes, size))
        .await
        .map_err(|e| FetchError::from(e).to_string())?
        .map_err(|e| e.to_string())?;

    let (width, height) = thumbnail.dimensions();
    Ok(Handle::from_rgba(width, height, thumbnail.into_raw()))
}

/// Decode `bytes` and fit the result inside a `size` x `size` square.
/// Images already small enough are not upscaled.
pub fn make_thumbnail(bytes: &[u8], size: u32) -> Result<RgbaImage, FetchError> {
    let img = image::load_from_memory(bytes)?;
    let img = if img.width() > size || img.height() > size {
        img.resize(size, size, FilterType::Lanczos3)
    } else {
        img
    };
    Ok(DynamicImage::into_rgba8(img))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_landscape_fits_square() {
        let thumb = make_thumbnail(&png(640, 320), 256).unwrap();
        assert_eq!(thumb.dimensions(), (256, 128));
    }

    #[test]
    fn test_portrait_fits_square() {
        let thumb = make_thumbnail(&png(300, 600), 100).unwrap();
        assert_eq!(thumb.dimensions(), (50, 100));
    }

    #[test]
    fn test_small_image_not_upscaled() {
        let thumb = make_thumbnail(&png(64, 48), 256).unwrap();
        assert_eq!(thumb.dimensions(), (64, 48));
    }

    #[test]
    fn test_garbage_rejected() {
        let err = make_thumbnail(b"<html>not an image</html>", 256).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
