/// Shared data structures for the application state
/// 
/// These structs represent the data model that flows between
/// the API layer and the UI layer.

use iced::widget::image::Handle;

use crate::api::Hit;

/// Represents a single image in the gallery
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    /// Pixabay image ID
    pub id: u64,
    /// Full-size image shown in the lightbox
    pub image_url: String,
    /// Medium sized image used for the gallery tile
    pub thumbnail_url: String,
    /// Alt text (the hit's tags)
    pub alt: String,
}

impl From<Hit> for GalleryItem {
    fn from(hit: Hit) -> Self {
        Self {
            id: hit.id,
            image_url: hit.large_image_url,
            thumbnail_url: hit.webformat_url,
            alt: hit.tags,
        }
    }
}

/// Download state of a gallery tile's thumbnail
#[derive(Debug, Clone)]
pub enum Thumbnail {
    Loading,
    Ready(Handle),
    Failed,
}
