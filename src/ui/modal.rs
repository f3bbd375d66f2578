/// Lightbox overlay
///
/// A dimmed backdrop covers the whole window. Clicking the backdrop sends
/// `CloseModal`; clicks on the content itself are swallowed.
use iced::widget::{button, center, column, container, mouse_area, opaque, row, stack, text, Image};
use iced::{Alignment, Color, ContentFit, Element, Length};

use crate::state::data::GalleryItem;
use crate::state::lightbox::FullImage;
use crate::Message;

/// Put `content` in a modal above `base`
pub fn view<'a>(base: Element<'a, Message>, content: Element<'a, Message>) -> Element<'a, Message> {
    let backdrop = center(opaque(content)).padding(40).style(|_theme| container::Style {
        background: Some(
            Color {
                a: 0.8,
                ..Color::BLACK
            }
            .into(),
        ),
        ..container::Style::default()
    });

    stack![base, opaque(mouse_area(backdrop).on_press(Message::CloseModal))].into()
}

/// Full-size image with its caption and actions
pub fn lightbox<'a>(item: &'a GalleryItem, image: &'a FullImage) -> Element<'a, Message> {
    let (body, can_save): (Element<'a, Message>, bool) = match image {
        FullImage::Loading => (
            center(text("Loading full image…").size(18)).into(),
            false,
        ),
        FullImage::Ready(loaded) => (
            Image::new(loaded.handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Contain)
                .into(),
            true,
        ),
        FullImage::Failed(message) => (
            center(text(format!("Could not load image: {}", message)).size(16)).into(),
            false,
        ),
    };

    let save = button(text("Save…").size(14))
        .on_press_maybe(can_save.then_some(Message::SaveImage))
        .padding([6, 12]);
    let close = button(text("Close").size(14))
        .on_press(Message::CloseModal)
        .padding([6, 12]);

    let footer = row![
        text(&item.alt).size(14).width(Length::Fill),
        save,
        close,
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    container(column![body, footer].spacing(10))
        .padding(12)
        .width(Length::Fill)
        .height(Length::Fill)
        .max_width(1280.0)
        .max_height(880.0)
        .style(container::rounded_box)
        .into()
}
