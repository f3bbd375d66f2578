/// Wire types for the Pixabay search endpoint
///
/// Only the fields the gallery uses are decoded; everything else in a hit
/// (views, likes, user, ...) is ignored by serde.

use serde::Deserialize;

/// One page of search results
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResponse {
    /// Number of matches reachable through the API (capped by Pixabay)
    #[serde(rename = "totalHits")]
    pub total_hits: u64,
    pub hits: Vec<Hit>,
}

/// A single image record
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Hit {
    pub id: u64,
    /// Medium sized image (up to 640px), used for gallery tiles
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    /// Scaled image with a maximum width/height of 1280px
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,
    /// Comma separated tag list, used as alt text
    #[serde(default)]
    pub tags: String,
}
