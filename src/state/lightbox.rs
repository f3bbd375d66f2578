/// Lightbox state: which image is shown full-size and whether it has loaded

use crate::remote::LoadedImage;

#[derive(Debug, Clone)]
pub enum FullImage {
    Loading,
    Ready(LoadedImage),
    Failed(String),
}

#[derive(Debug)]
struct Open {
    id: u64,
    image: FullImage,
}

#[derive(Debug, Default)]
pub struct Lightbox {
    open: Option<Open>,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `id`. The full-size image starts out loading.
    pub fn open(&mut self, id: u64) {
        self.open = Some(Open {
            id,
            image: FullImage::Loading,
        });
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn selected(&self) -> Option<u64> {
        self.open.as_ref().map(|open| open.id)
    }

    pub fn image(&self) -> Option<&FullImage> {
        self.open.as_ref().map(|open| &open.image)
    }

    /// Store a finished download. Returns false (and drops the result) when the
    /// lightbox was closed or moved on to another image in the meantime.
    pub fn finish(&mut self, id: u64, result: Result<LoadedImage, String>) -> bool {
        match self.open.as_mut() {
            Some(open) if open.id == id => {
                open.image = match result {
                    Ok(image) => FullImage::Ready(image),
                    Err(message) => FullImage::Failed(message),
                };
                true
            }
            _ => false,
        }
    }
}
