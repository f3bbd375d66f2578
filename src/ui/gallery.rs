use std::collections::HashMap;

use iced::widget::{center, container, mouse_area, text, tooltip, Image};
use iced::{mouse, ContentFit, Element, Length};
use iced_aw::Wrap;

use crate::state::data::{GalleryItem, Thumbnail};
use crate::Message;

/// Tile height relative to its width, Pixabay web images are mostly 3:2
const TILE_ASPECT: f32 = 2.0 / 3.0;

/// Thumbnail grid. Tiles wrap to the window width; clicking one opens it
/// in the lightbox.
pub fn view<'a>(
    items: &'a [GalleryItem],
    thumbnails: &'a HashMap<u64, Thumbnail>,
    tile_width: f32,
) -> Element<'a, Message> {
    let tiles: Vec<Element<'a, Message>> = items
        .iter()
        .map(|item| tile(item, thumbnails.get(&item.id), tile_width))
        .collect();

    container(Wrap::with_elements(tiles).spacing(12.0).line_spacing(12.0))
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into()
}

fn tile<'a>(
    item: &'a GalleryItem,
    thumbnail: Option<&'a Thumbnail>,
    width: f32,
) -> Element<'a, Message> {
    let content: Element<'a, Message> = match thumbnail {
        Some(Thumbnail::Ready(handle)) => Image::new(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover)
            .into(),
        Some(Thumbnail::Failed) => center(text("Image unavailable").size(13)).into(),
        Some(Thumbnail::Loading) | None => center(text("…").size(20)).into(),
    };

    let framed = container(content)
        .width(Length::Fixed(width))
        .height(Length::Fixed(width * TILE_ASPECT))
        .style(container::rounded_box);

    let clickable = mouse_area(framed)
        .on_press(Message::OpenImage(item.id))
        .interaction(mouse::Interaction::Pointer);

    tooltip(clickable, text(&item.alt).size(13), tooltip::Position::Bottom)
        .style(container::rounded_box)
        .into()
}
