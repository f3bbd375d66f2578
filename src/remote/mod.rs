/// Remote image module
///
/// This module handles:
/// - Downloading image bytes from the CDN
/// - Generating gallery thumbnails
/// - Loading full-size images for the lightbox
/// - Saving full-size images to disk

pub mod preview;
pub mod thumbnail;

use std::sync::Arc;

use iced::widget::image::Handle;
use reqwest::Client;
use thiserror::Error;

pub use preview::{fetch_full_image, save_image, suggested_file_name};
pub use thumbnail::fetch_thumbnail;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("download failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("image server returned {0}")]
    Status(u16),
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("could not write file: {0}")]
    Io(#[from] std::io::Error),
}

/// A decoded full-size image, ready to render and to save
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub handle: Handle,
    /// Original encoded bytes, written as-is when saving
    pub bytes: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
}

impl LoadedImage {
    pub fn new(bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            handle: Handle::from_bytes(bytes.clone()),
            bytes: Arc::new(bytes),
            width,
            height,
        }
    }
}

/// Download the body of `url`
pub async fn fetch_bytes(http: &Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    Ok(response.bytes().await?.to_vec())
}
