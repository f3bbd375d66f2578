use iced::widget::{button, container, row, text, text_input};
use iced::{Alignment, Background, Color, Element, Length};

use crate::Message;

/// Search field id, focused when the window opens
pub fn input_id() -> text_input::Id {
    text_input::Id::new("search-query")
}

/// Header bar with the Search button and the query field.
/// Enter in the field submits just like the button.
pub fn view(input: &str) -> Element<'_, Message> {
    let search = button(text("Search").size(16))
        .on_press(Message::Submit)
        .padding([10, 18]);

    let field = text_input("Search images and photos", input)
        .id(input_id())
        .on_input(Message::QueryChanged)
        .on_submit(Message::Submit)
        .padding(10)
        .size(18)
        .width(Length::Fixed(560.0));

    container(row![search, field].spacing(8).align_y(Alignment::Center))
        .padding(14)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(Color::from_rgb8(0x3f, 0x51, 0xb5))),
            ..container::Style::default()
        })
        .into()
}
