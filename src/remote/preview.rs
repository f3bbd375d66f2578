/// Full-size image loading for the lightbox
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use image::ImageReader;
use reqwest::Client;

use super::{fetch_bytes, FetchError, LoadedImage};

/// Download the full-size image for `url`
pub async fn fetch_full_image(http: Client, url: String) -> Result<LoadedImage, String> {
    let bytes = fetch_bytes(&http, &url)
        .await
        .map_err(|e| e.to_string())?;

    // Spawn blocking task for CPU-bound work
    let loaded = tokio::task::spawn_blocking(move || load_full_image(bytes))
        .await
        .map_err(|e| FetchError::from(e).to_string())?
        .map_err(|e| e.to_string())?;

    tracing::info!(
        "📸 Loaded full image {}x{} ({:.1}KB)",
        loaded.width,
        loaded.height,
        loaded.bytes.len() as f64 / 1024.0
    );
    Ok(loaded)
}

/// Check that `bytes` hold a readable image and read its dimensions
pub fn load_full_image(bytes: Vec<u8>) -> Result<LoadedImage, FetchError> {
    let (width, height) = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(LoadedImage::new(bytes, width, height))
}

/// File name offered in the save dialog: the last URL segment, or `<id>.jpg`
pub fn suggested_file_name(url: &str, id: u64) -> String {
    url.split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| name.contains('.'))
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}.jpg", id))
}

/// Write the original bytes of a full-size image to `path`
pub async fn save_image(path: PathBuf, bytes: Arc<Vec<u8>>) -> Result<PathBuf, String> {
    tokio::fs::write(&path, bytes.as_slice())
        .await
        .map_err(|e| FetchError::from(e).to_string())?;
    tracing::info!("💾 Saved image to {}", path.display());
    Ok(path)
}
